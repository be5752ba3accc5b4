use clap::Parser;
use gridduel::prelude::*;
use tracing_subscriber::EnvFilter;

/// Authoritative server for a two-player grid duel.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Reply "Invalid move" to every rejected move instead of the reason
    #[arg(long)]
    generic_errors: bool,
}

impl Args {
    fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn table_config(&self) -> TableConfig {
        let error_detail = if self.generic_errors {
            ErrorDetail::Generic
        } else {
            ErrorDetail::Specific
        };
        TableConfig {
            error_detail,
            ..TableConfig::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let addr = args.bind_addr();
    tracing::info!(%addr, generic_errors = args.generic_errors, "starting gridduel server");

    let server = GridduelServerBuilder::new()
        .bind(&addr)
        .table_config(args.table_config())
        .build()
        .await?;

    server.run().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["gridduel"]);
        assert_eq!(args.bind_addr(), "127.0.0.1:8080");
        assert_eq!(args.table_config().error_detail, ErrorDetail::Specific);
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from([
            "gridduel",
            "-H",
            "0.0.0.0",
            "--port",
            "9000",
            "--generic-errors",
        ]);
        assert_eq!(args.bind_addr(), "0.0.0.0:9000");
        assert_eq!(args.table_config().error_detail, ErrorDetail::Generic);
    }
}
