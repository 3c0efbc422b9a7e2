//! Command handlers for the onebox binary
//!
//! Plays the presentation layer: calls into the onebox crate and renders
//! results as plain text.

use anyhow::{Context, Result, bail};
use log::{info, warn};
use onebox::storage::KeyValueStore;
use onebox::{
    CALLBACK_RETRY_DELAY, DirectRequest, DirectRequestRunner, DraftStore, FileStore, HeaderRow,
    HttpMethod, Inbox, Onebox, OneboxConfig, Reply, Session, Theme, ThemeStore, Thread, ThreadId,
    UreqTransport, collect_headers, google_login_url, parse_body, redirect_to_google_login,
    suggest_tags,
};
use std::sync::Arc;

use crate::{Commands, DraftCommands};

/// Sender used when nobody is signed in
const FALLBACK_SENDER: &str = "me@example.com";

pub struct OneboxApp {
    config: OneboxConfig,
    onebox: Onebox,
    runner: DirectRequestRunner,
    drafts: DraftStore,
    themes: ThemeStore,
}

impl OneboxApp {
    pub fn new(env_override: Option<&str>) -> Result<Self> {
        let mut config = OneboxConfig::load().context("Failed to load onebox configuration")?;
        if let Some(env) = env_override {
            config.environment = env.parse()?;
        }

        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open_default()?);
        let (onebox, runner) =
            Onebox::from_config(&config, store.clone(), Arc::new(UreqTransport::new()));

        Ok(Self {
            config,
            onebox,
            runner,
            drafts: DraftStore::new(store.clone()),
            themes: ThemeStore::new(store),
        })
    }

    pub fn run(self, command: Commands) -> Result<()> {
        match command {
            Commands::Login { origin } => {
                let url = redirect_to_google_login(&self.config.api_base, &origin);
                println!("Login URL: {}", url);
                println!("Finish signing in in the browser, then run `onebox callback <url>`.");
            }
            Commands::Callback { url } => self.callback(&url)?,
            Commands::Logout => {
                Session::new(&self.onebox).logout()?;
                println!("Signed out.");
            }
            Commands::Whoami => match Session::new(&self.onebox).current_user()? {
                Some(user) => println!("{} <{}>", user.name, user.email),
                None => println!("Not signed in."),
            },
            Commands::List => self.list()?,
            Commands::Show { id } => self.show(&ThreadId::new(id))?,
            Commands::Delete { id } => self.delete(&ThreadId::new(id))?,
            Commands::Reply { id, body } => self.reply(&ThreadId::new(id), body)?,
            Commands::Draft { action } => self.draft(action)?,
            Commands::Theme { value } => self.theme(value.as_deref())?,
            Commands::Request {
                endpoint,
                method,
                no_relay,
                data,
                headers,
            } => self.request(endpoint, &method, !no_relay, data.as_deref(), &headers)?,
        }
        Ok(())
    }

    fn callback(&self, url: &str) -> Result<()> {
        match Session::new(&self.onebox).complete_callback(url) {
            Ok(credential) => {
                println!("Signed in as {} <{}>", credential.user.name, credential.user.email);
                Ok(())
            }
            Err(e) => {
                println!("Authentication failed. Please try again.");
                std::thread::sleep(CALLBACK_RETRY_DELAY);
                println!(
                    "Log in again at: {}",
                    google_login_url(&self.config.api_base, "http://localhost:3000")
                );
                Err(e.into())
            }
        }
    }

    fn list(&self) -> Result<()> {
        let inbox = Inbox::load(&self.onebox)?;
        if inbox.is_empty() {
            println!("Inbox is empty.");
        }
        for thread in inbox.threads() {
            println!(
                "{:<6} {:<20} {:<40} {}",
                thread.id,
                truncate(thread.sender_display(), 20),
                truncate(&thread.subject, 40),
                format_time(thread)
            );
        }
        Ok(())
    }

    fn show(&self, id: &ThreadId) -> Result<()> {
        let thread = self.onebox.get_thread(id)?;
        println!("From:    {} <{}>", thread.sender_display(), thread.from);
        println!("To:      {}", thread.to);
        println!("Subject: {}", thread.subject);
        println!("Date:    {}", format_time(&thread));
        println!();
        println!("{}", thread.body);

        let tags = suggest_tags(&thread.subject, &thread.body);
        if !tags.is_empty() {
            let names: Vec<_> = tags.iter().map(|t| t.name).collect();
            println!();
            println!("Suggested tags: {}", names.join(", "));
        }
        if let Some(draft) = self.drafts.load(id)? {
            println!();
            println!("Draft: {}", draft);
        }
        Ok(())
    }

    fn delete(&self, id: &ThreadId) -> Result<()> {
        let mut inbox = Inbox::load(&self.onebox)?;
        if inbox.get(id).is_none() {
            warn!("Thread {} is not in the current inbox", id);
        }
        let ack = inbox.delete(&self.onebox, id)?;
        println!("{} ({} threads left)", ack.message, inbox.len());
        Ok(())
    }

    fn reply(&self, id: &ThreadId, body: Option<String>) -> Result<()> {
        let body = match body.or(self.drafts.load(id)?) {
            Some(body) if !body.trim().is_empty() => body,
            _ => bail!("Reply body is empty; pass --body or save a draft first"),
        };

        let thread = self.onebox.get_thread(id)?;
        let from = Session::new(&self.onebox)
            .current_user()?
            .map(|u| u.email)
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| FALLBACK_SENDER.to_string());

        let reply = Reply::to_thread(&thread, from, body);
        let ack = self.onebox.send_reply(id, &reply)?;
        self.drafts.discard(id)?;
        println!("{}", ack.message);
        Ok(())
    }

    fn draft(&self, action: DraftCommands) -> Result<()> {
        match action {
            DraftCommands::Save { id, content } => {
                self.drafts.save(&ThreadId::new(id), &content)?;
                println!("Draft saved successfully!");
            }
            DraftCommands::Show { id } => match self.drafts.load(&ThreadId::new(id))? {
                Some(draft) => println!("{}", draft),
                None => println!("No draft saved."),
            },
            DraftCommands::Discard { id } => {
                self.drafts.discard(&ThreadId::new(id))?;
                println!("Draft discarded.");
            }
        }
        Ok(())
    }

    fn theme(&self, value: Option<&str>) -> Result<()> {
        let theme = match value {
            None => self.themes.get()?,
            Some("toggle") => self.themes.toggle()?,
            Some(raw) => {
                let theme: Theme = raw.parse()?;
                self.themes.set(theme)?;
                theme
            }
        };
        println!("Theme: {}", theme);
        Ok(())
    }

    fn request(
        &self,
        endpoint: Option<String>,
        method: &str,
        use_relay: bool,
        data: Option<&str>,
        raw_headers: &[String],
    ) -> Result<()> {
        let method: HttpMethod = method.parse()?;
        let body = parse_body(method, data.unwrap_or_default())?;
        let rows = raw_headers
            .iter()
            .map(|h| HeaderRow::parse(h))
            .collect::<onebox::Result<Vec<_>>>()?;

        let endpoint = endpoint.unwrap_or_else(|| self.runner.list_endpoint());
        let request = DirectRequest::get(endpoint)
            .method(method)
            .relay(use_relay)
            .body(body)
            .headers(collect_headers(&rows));

        if use_relay {
            info!("Routing through {} relay", self.runner.relay());
        }
        let (body, meta) = self.runner.send_timed(&request)?;
        println!(
            "Success  time: {}ms  size: {} bytes  type: {}",
            meta.elapsed.as_millis(),
            meta.size,
            meta.content_type
        );
        println!("{}", serde_json::to_string_pretty(&body)?);
        Ok(())
    }
}

fn format_time(thread: &Thread) -> String {
    thread
        .received_at()
        .map(|at| {
            at.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| thread.timestamp.clone())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
