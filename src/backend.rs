/// Code generation failed in the collaborator. The front-end does not
/// inspect how the artifact is produced; it only propagates the message.
#[derive(Debug)]
pub struct BackendError {
    pub message: String,
}

impl BackendError {
    pub fn new(msg: impl Into<String>) -> Self {
        BackendError {
            message: msg.into(),
        }
    }
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "backend error: {}", self.message)
    }
}

impl std::error::Error for BackendError {}

/// The external lowering collaborator.
///
/// The front-end hands over each intrinsic's resolved concrete argument, in
/// program order, and finally `finish`. What the backend produces from that
/// (object file, bytecode, anything) is its own business.
pub trait Backend {
    /// The generated program terminates with this exit code.
    fn emit_exit(&mut self, code: i64) -> Result<(), BackendError>;

    /// The generated program prints this literal text.
    fn emit_puts(&mut self, text: &str) -> Result<(), BackendError>;

    /// Called once after the whole sequence was emitted.
    fn finish(&mut self) -> Result<(), BackendError>;
}

/// Reference backend: prints the call sequence as a listing. Stands in for
/// a real code generator in the CLI.
#[derive(Debug, Default)]
pub struct ListingBackend {
    calls: usize,
}

impl ListingBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for ListingBackend {
    fn emit_exit(&mut self, code: i64) -> Result<(), BackendError> {
        println!("call exit({})", code);
        self.calls += 1;
        Ok(())
    }

    fn emit_puts(&mut self, text: &str) -> Result<(), BackendError> {
        println!("call puts({:?})", text);
        self.calls += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), BackendError> {
        println!("{} intrinsic call(s) emitted", self.calls);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_backend_counts_calls() {
        let mut backend = ListingBackend::new();
        backend.emit_puts("hi").unwrap();
        backend.emit_exit(0).unwrap();
        backend.finish().unwrap();
        assert_eq!(backend.calls, 2);
    }

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::new("cannot emit object file");
        assert_eq!(err.to_string(), "backend error: cannot emit object file");
    }
}
