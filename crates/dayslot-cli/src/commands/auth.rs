use clap::Subcommand;
use dayslot_core::integrations::GoogleAuth;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Google: login / logout / status
    Google {
        #[command(subcommand)]
        action: AuthOp,
    },
}

#[derive(Subcommand)]
pub enum AuthOp {
    /// Authorize calendar access in the browser
    Login {
        /// OAuth client ID (stored in the OS keyring)
        #[arg(long)]
        client_id: Option<String>,
        /// OAuth client secret (stored in the OS keyring)
        #[arg(long)]
        client_secret: Option<String>,
    },
    /// Remove stored tokens
    Logout,
    /// Check authentication status
    Status,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::Google { action: op } => handle_google(op),
    }
}

fn handle_google(op: AuthOp) -> Result<(), Box<dyn std::error::Error>> {
    match op {
        AuthOp::Login {
            client_id,
            client_secret,
        } => {
            let auth = match (client_id, client_secret) {
                (Some(cid), Some(csec)) => {
                    let auth = GoogleAuth::with_credentials(cid, csec);
                    auth.store_credentials()?;
                    auth
                }
                (None, None) => GoogleAuth::new(),
                _ => return Err("--client-id and --client-secret must be given together".into()),
            };
            if !auth.has_credentials() {
                return Err(
                    "no stored Google credentials; pass --client-id and --client-secret".into(),
                );
            }

            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(auth.authenticate())?;
            println!("Google authenticated");
        }
        AuthOp::Logout => {
            GoogleAuth::new().disconnect()?;
            println!("Google disconnected");
        }
        AuthOp::Status => {
            let g = GoogleAuth::new();
            println!(
                "{}",
                if g.is_authenticated() {
                    "authenticated"
                } else if g.has_credentials() {
                    "credentials stored, not authenticated"
                } else {
                    "not authenticated"
                }
            );
        }
    }
    Ok(())
}
