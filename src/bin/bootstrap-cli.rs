use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "bootstrap-cli")]
#[command(about = "Fetch an etcd bootstrap script from a running service", long_about = None)]
struct Cli {
    #[arg(long, default_value = "http://localhost:8080/")]
    url: String,

    /// Node address (repeat up to three times)
    #[arg(short, long = "ip")]
    ips: Vec<String>,

    /// Enable TLS between members
    #[arg(short, long)]
    encryption: Option<String>,

    /// Initial cluster token
    #[arg(short, long)]
    token: Option<String>,

    /// Member name prefix
    #[arg(short = 'r', long)]
    prefix: Option<String>,

    #[arg(short, long)]
    client_port: Option<String>,

    #[arg(short, long)]
    peer_port: Option<String>,

    /// Data directory on the nodes
    #[arg(short, long)]
    dir: Option<String>,

    /// Root user to create
    #[arg(short, long)]
    user: Option<String>,

    /// etcd version
    #[arg(short = 'v', long = "etcd-version")]
    etcd_version: Option<String>,

    /// Write the script here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn query(&self) -> Result<Vec<(&'static str, &str)>, String> {
        if self.ips.len() > 3 {
            return Err(format!("at most 3 node addresses, got {}", self.ips.len()));
        }

        let mut query: Vec<(&'static str, &str)> = ["i1", "i2", "i3"]
            .into_iter()
            .zip(self.ips.iter().map(String::as_str))
            .collect();

        let optional = [
            ("e", &self.encryption),
            ("t", &self.token),
            ("r", &self.prefix),
            ("c", &self.client_port),
            ("p", &self.peer_port),
            ("d", &self.dir),
            ("u", &self.user),
            ("v", &self.etcd_version),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                query.push((key, value.as_str()));
            }
        }
        Ok(query)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let query = cli.query()?;

    let res = reqwest::Client::new()
        .get(&cli.url)
        .query(&query)
        .send()
        .await?;

    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        eprintln!("{}", text);
        std::process::exit(1);
    }

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &text)?;
            eprintln!("Wrote {} bytes to {}", text.len(), path.display());
        }
        None => print!("{}", text),
    }

    Ok(())
}
