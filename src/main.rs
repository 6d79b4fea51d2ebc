use anyhow::Context as _;
use clap::{Parser, Subcommand};
use std::path::Path;
use tgkit_bot::types::ChatId;
use tgkit_bot::{Bot, TextOptions, TgError, Update, UpdateKind};
use tgkit_core::config::{self, LogConfig};
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tgkit", version, about = "Telegram Bot API toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Bot token. Overrides `bot.token` from the config file.
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the bot's own account.
    Me,
    /// Send a text message.
    Send {
        /// Numeric chat id or @channelusername.
        chat: String,
        #[arg(trailing_var_arg = true, required = true)]
        text: Vec<String>,
    },
    /// Log every incoming update until Ctrl-C.
    Listen,
    /// Run an echo bot: repeats text messages and answers button presses.
    Echo,
    /// Download a file by id.
    Download {
        file_id: String,
        /// Output path. Defaults to `<file_id>.<extension>`.
        #[arg(short, long)]
        out: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = config::load(&cli.config)?;
    if let Some(token) = cli.token {
        cfg.bot.token = token;
    }
    let _log_guard = init_logging(&cfg.log)?;

    let bot = Bot::from_config(&cfg.bot)?;

    match cli.command {
        Commands::Me => {
            let me = bot.get_me().await?;
            println!("{}", serde_json::to_string_pretty(&me)?);
        }
        Commands::Send { chat, text } => {
            let sent = bot
                .send_text(parse_chat(&chat), &text.join(" "), TextOptions::default())
                .await?;
            println!("sent message {} to {}", sent.message_id, sent.chat_id());
        }
        Commands::Listen => {
            let mut poller = bot.poller(cfg.polling.clone());
            info!("listening for updates (Ctrl-C to stop)");
            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => break,
                    update = poller.next_update() => log_update(&update),
                }
            }
            info!("stopped at offset {:?}", poller.offset());
        }
        Commands::Echo => {
            let mut updates = bot.poller(cfg.polling.clone()).spawn();
            let mut states = updates.state_changes();
            info!("echo bot running (Ctrl-C to stop)");

            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => break,
                    Ok(()) = states.changed() => {
                        info!("connection {}", *states.borrow());
                    }
                    update = updates.next() => {
                        let Some(update) = update else { break };
                        log_update(&update);
                        if let Err(e) = echo(&bot, &update).await {
                            warn!("echo failed for update {}: {e}", update.id);
                        }
                    }
                }
            }

            let poller = updates.into_poller().await?;
            info!("stopped at offset {:?}", poller.offset());
        }
        Commands::Download { file_id, out } => {
            let file = bot.download_file(&file_id).await?;
            let out = out.unwrap_or_else(|| match &file.file_extension {
                Some(ext) => format!("{file_id}.{ext}"),
                None => file_id.clone(),
            });
            tokio::fs::write(&out, &file.data)
                .await
                .with_context(|| format!("failed to write {out}"))?;
            println!("saved {} bytes to {out}", file.data.len());
        }
    }

    Ok(())
}

/// Stdout logging, or a log file when `log.file` is set. `RUST_LOG` wins
/// over `log.level`.
fn init_logging(cfg: &LogConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));

    let Some(ref file) = cfg.file else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
        return Ok(None);
    };

    let path = Path::new(file);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .with_context(|| format!("log.file has no file name: {file}"))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log dir {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(Some(guard))
}

fn parse_chat(chat: &str) -> ChatId {
    match chat.parse::<i64>() {
        Ok(id) => ChatId::Id(id),
        Err(_) => ChatId::Username(chat.to_string()),
    }
}

fn log_update(update: &Update) {
    match &update.kind {
        UpdateKind::Message(msg) | UpdateKind::EditedMessage(msg) => {
            let from = msg
                .from
                .as_ref()
                .map(|u| u.display_name())
                .unwrap_or_default();
            info!(
                "update {} ({}): chat {} from {from}: {}",
                update.id,
                update.content(),
                msg.chat.id,
                msg.text.as_deref().unwrap_or("<non-text>")
            );
        }
        UpdateKind::CallbackQuery(q) => info!(
            "update {} (callback_query): {} pressed {:?}",
            update.id,
            q.from.display_name(),
            q.data
        ),
        UpdateKind::InlineQuery(q) => info!(
            "update {} (inline_query): {} asked {:?}",
            update.id,
            q.from.display_name(),
            q.query
        ),
        _ => info!("update {} ({})", update.id, update.content()),
    }
}

async fn echo(bot: &Bot, update: &Update) -> Result<(), TgError> {
    match &update.kind {
        UpdateKind::Message(msg) => {
            if let Some(text) = msg.text.as_deref() {
                bot.reply_text(msg, text, TextOptions::default()).await?;
            }
        }
        UpdateKind::CallbackQuery(q) => {
            bot.answer_callback(q, q.data.as_deref()).await?;
        }
        _ => debug!("echo: ignoring {}", update.content()),
    }
    Ok(())
}
