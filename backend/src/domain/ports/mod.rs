//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod completion_provider;
mod homework_session_repository;
mod identity_provider;
mod solve_homework;

#[cfg(test)]
pub use completion_provider::MockCompletionProvider;
pub use completion_provider::{
    Completion, CompletionProvider, CompletionProviderError, UnconfiguredCompletionProvider,
};
#[cfg(test)]
pub use homework_session_repository::MockHomeworkSessionRepository;
pub use homework_session_repository::{
    FixtureHomeworkSessionRepository, HomeworkSessionRepository, HomeworkSessionRepositoryError,
};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{
    FIXTURE_TOKEN, FIXTURE_USER_ID, FixtureIdentityProvider, IdentityProvider,
    IdentityProviderError,
};
#[cfg(test)]
pub use solve_homework::MockSolveHomework;
pub use solve_homework::{
    FIXTURE_SOLUTION, FixtureSolveHomework, SolveHomework, SolveHomeworkRequest,
    SolveHomeworkResponse,
};
