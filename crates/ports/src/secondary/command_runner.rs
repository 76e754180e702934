use std::future::Future;
use std::pin::Pin;

use domain::command::entity::CommandOutcome;
use domain::common::error::DomainError;

/// Secondary port for spawning external lookup/response commands.
///
/// The program and arguments are passed as an argument vector, never as a
/// shell string. Uses `Pin<Box<dyn Future>>` return type (instead of RPITIT)
/// so the trait is dyn-compatible and can be used as `Arc<dyn CommandRunner>`.
pub trait CommandRunner: Send + Sync {
    /// Spawn `program` with `args`, wait for it to exit, and capture
    /// stdout/stderr/exit status. A non-zero exit is a successful
    /// `CommandOutcome`; only spawn failures are errors.
    fn run<'a>(
        &'a self,
        program: &'a str,
        args: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutcome, DomainError>> + Send + 'a>>;
}
