// ============================================
// src/main.rs (メインファイル)
// ============================================

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use kanaquiz::Family;
use kanaquiz::config::Config;

/// かなを見てローマ字で答えるクイズ
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// ひらがなだけ出題する
    #[arg(long, conflicts_with = "kata")]
    hira: bool,

    /// カタカナだけ出題する
    #[arg(long)]
    kata: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// ブラウザ版のクイズを配信する
    Serve {
        /// 待ち受けるアドレス (環境変数 HOST でも指定可)
        #[arg(long)]
        host: Option<String>,

        /// 待ち受けるポート (環境変数 PORT でも指定可)
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    fn family(&self) -> Family {
        match (self.hira, self.kata) {
            (true, _) => Family::Hiragana,
            (_, true) => Family::Katakana,
            _ => Family::Both,
        }
    }
}

// --------------------------------------------------
// ログ
// --------------------------------------------------

/// `RUST_LOG` がなければ `default_filter` を使う
fn init_tracing(default_filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Serve { host, port }) => {
            init_tracing("kanaquiz=info")?;

            let mut config = Config::from_env();
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(kanaquiz::web::serve(&config))
        }
        None => {
            // 代替スクリーン表示中は stderr に書くと画面が崩れるので、既定では出さない
            init_tracing("off")?;
            kanaquiz::tui::run(cli.family())
        }
    }
}
