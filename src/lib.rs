/// Balance and transaction history of a single account.
/// Commands are validated first and only then applied, so a rejected
/// command never leaves a trace.
pub mod account;

/// Commands executed by [`account`], and the script steps that produce them.
pub mod command;

/// Human-readable statements and money formatting.
pub mod statement;

/// Customer record owning at most one [`account::Account`].
pub mod customer;

/// Customer registry interface, plus "in memory" implementation.
/// Routes script commands to the right customer's account.
pub mod processor;

/// Runs scripts (including the bundled demo) against the registry.
/// Lives in the library so integration tests can drive it.
pub mod bin_utils;
