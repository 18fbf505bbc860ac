use anyhow::Result;
use string_queue::Queue;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    init_logging()?;

    let mut queue = Queue::new();
    dbg!(&queue);

    queue.insert_tail(Some("a"))?;
    queue.insert_tail(Some("b"))?;
    queue.insert_head(Some("c"))?;
    info!(size = queue.size(), "filled");

    let mut tiny = [0xffu8; 1];
    queue.remove_head(Some(&mut tiny[..]))?;
    info!(?tiny, "removed into a one-byte buffer");

    queue.reverse();
    dbg!(&queue);

    let mut buf = [0u8; 16];
    queue.remove_head(Some(&mut buf[..]))?;
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    info!(removed = %String::from_utf8_lossy(&buf[..end]), size = queue.size(), "removed head");

    queue.destroy();
    Ok(())
}

fn init_logging() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("string_queue=trace"))?;

    let log_format =
        std::env::var("STRING_QUEUE_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    match log_format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json())
            .try_init()?,
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty())
            .try_init()?,
    }

    Ok(())
}
