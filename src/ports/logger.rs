use std::fmt;

/// Port for relay-lifetime log output.
///
/// A logger is a capability handed in through configuration; every log
/// line the relay produces goes through it, never to a global sink.
/// Built-in implementations live in `adapters::logging`: a stderr default
/// and a no-op sink for silent operation.
pub trait LoggerPort: Send + Sync {
    /// Log a formatted event.
    fn event(&self, message: fmt::Arguments<'_>);

    /// Log a plain line.
    fn line(&self, message: &str);
}
