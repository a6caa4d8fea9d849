use std::sync::Once;

static LOG_INIT: Once = Once::new();

pub fn init_log() {
    init_log_with("debug");
}

/// Start the stdout logger once; `RUST_LOG` wins over `spec`.
pub fn init_log_with(spec: &str) {
    LOG_INIT.call_once(|| {
        let started = flexi_logger::Logger::try_with_env_or_str(spec)
            .and_then(|lg| lg.log_to_stdout().start());
        match started {
            // keep logging for the rest of the process
            Ok(handle) => std::mem::forget(handle),
            Err(e) => eprintln!("logger init failed: {}", e),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice() {
        init_log();
        init_log_with("info");
        log::debug!("logger still usable");
    }
}
