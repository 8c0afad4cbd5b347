//! Interactive front end: prompts, error messages, and the two views.
//!
//! This is deliberately thin I/O glue around the controller and the gate.
//! All decisions about tokens and phases live in `auth` and `gate`.

use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::{AuthClient, AuthError};
use crate::auth::{SessionController, SessionStore};
use crate::config::Config;
use crate::gate::{self, View};

pub struct App {
    config: Config,
    controller: SessionController,
}

impl App {
    pub fn new() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        let store = SessionStore::open(Config::session_dir()?)
            .context("Failed to open session store")?;
        let client = AuthClient::new(&config)?;

        Ok(Self {
            controller: SessionController::new(store, client),
            config,
        })
    }

    /// Run the gate flow: the synchronous gate first, then the advisory
    /// revalidation, then either the protected view or the login loop.
    pub async fn run(&mut self) -> Result<()> {
        if gate::initial_gate(self.controller.store()) == View::Protected {
            // Advisory confirmation; demotes to login if the server no
            // longer recognizes the stored token.
            if gate::background_revalidate(&self.controller).await == View::Protected {
                self.show_protected();
                return Ok(());
            }
            info!("Stored token rejected, falling back to login");
        }

        self.login_loop().await?;
        self.show_protected();
        Ok(())
    }

    /// Clear the session and identity
    pub fn logout(&mut self) {
        self.controller.logout();
    }

    /// Prompt for credentials until a login succeeds
    async fn login_loop(&mut self) -> Result<()> {
        println!("\n=== Login ===\n");

        loop {
            let username = self.prompt_username()?;
            let password = Self::prompt_password()?;

            if username.is_empty() || password.is_empty() {
                eprintln!("Username and password required.\n");
                continue;
            }

            let mut failure: Option<String> = None;
            self.controller
                .login(&username, &password, |e| failure = Some(friendly_message(e)))
                .await;

            if self.controller.is_logged_in() {
                self.config.last_username = Some(username);
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }
                return Ok(());
            }

            if let Some(message) = failure {
                eprintln!("{}\n", message);
            }
        }
    }

    fn prompt_username(&self) -> Result<String> {
        let input = match self.config.last_username {
            Some(ref last) => {
                print!("Username [{}]: ", last);
                io::stdout().flush()?;

                let mut input = String::new();
                io::stdin().read_line(&mut input)?;
                let input = input.trim();

                if input.is_empty() {
                    last.clone()
                } else {
                    input.to_string()
                }
            }
            None => {
                print!("Username: ");
                io::stdout().flush()?;

                let mut input = String::new();
                io::stdin().read_line(&mut input)?;
                input.trim().to_string()
            }
        };
        Ok(input)
    }

    fn prompt_password() -> Result<String> {
        let password = rpassword::prompt_password("Password: ")?;
        Ok(password)
    }

    fn show_protected(&self) {
        // Identity is in-memory only; after a restart the config username is
        // the best available hint until the next login.
        let username = self
            .controller
            .identity()
            .map(|i| i.username.as_str())
            .or(self.config.last_username.as_deref());

        match username {
            Some(username) => println!("\nWelcome, {}. You are logged in.", username),
            None => println!("\nYou are logged in."),
        }
    }
}

/// Map an auth error to the message shown at the prompt
fn friendly_message(error: &AuthError) -> String {
    match error {
        AuthError::InvalidCredentials => "Invalid username or password.".to_string(),
        AuthError::Network(e) if e.is_timeout() => {
            "Connection timed out. Please try again.".to_string()
        }
        AuthError::Network(_) => {
            "Unable to connect to the server. Check your internet connection.".to_string()
        }
        AuthError::InvalidResponse(_) => {
            "The server returned an unexpected response.".to_string()
        }
    }
}
