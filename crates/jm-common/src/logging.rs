use std::sync::OnceLock;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;

// Keeps the background log writer alive for the life of the process.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Set up the process-wide tracing subscriber and panic hook.
///
/// `RUST_LOG` controls filtering (default `info`). Setting `JM_LOG_DIR`
/// redirects output to `<dir>/<app_name>.log` with daily rotation; otherwise
/// events go to stdout. Panics are reported through `tracing` as well, and
/// `JM_LOG_INCLUDE_BACKTRACE=1` additionally chains to the default hook for
/// the full backtrace.
pub fn init(app_name: &'static str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    match daily_file_writer(app_name) {
        Some(writer) => {
            let _ = subscriber.with_writer(writer).try_init();
        }
        None => {
            let _ = subscriber.try_init();
        }
    }

    report_panics_via_tracing(app_name);
}

fn daily_file_writer(app_name: &'static str) -> Option<NonBlocking> {
    let dir = std::env::var_os("JM_LOG_DIR")?;

    if let Err(err) = std::fs::create_dir_all(&dir) {
        eprintln!("cannot create JM_LOG_DIR {dir:?} ({err}); logging to stdout");
        return None;
    }

    let appender = tracing_appender::rolling::daily(dir, format!("{app_name}.log"));
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = FILE_GUARD.set(guard);

    Some(writer)
}

fn report_panics_via_tracing(app_name: &'static str) {
    static HOOKED: OnceLock<()> = OnceLock::new();

    HOOKED.get_or_init(|| {
        let chain_default = std::env::var("JM_LOG_INCLUDE_BACKTRACE")
            .is_ok_and(|value| value == "1" || value.eq_ignore_ascii_case("true"));
        let default_hook = std::panic::take_hook();

        std::panic::set_hook(Box::new(move |info| {
            let payload = info.payload();
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_owned())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_owned());
            let at = info
                .location()
                .map(|location| location.to_string())
                .unwrap_or_else(|| "unknown location".to_owned());

            tracing::error!(
                application = app_name,
                at = %at,
                thread = std::thread::current().name().unwrap_or("unnamed"),
                %message,
                "panic"
            );

            if chain_default {
                default_hook(info);
            }
        }));
    });
}
