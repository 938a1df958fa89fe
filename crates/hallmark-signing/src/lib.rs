//! Hallmark Signing - platform code signing for release artifacts
//!
//! This crate drives the platform's native signing tool over a batch of
//! artifacts:
//! - macOS: codesign against a keychain identity
//! - Windows: signtool.exe from the newest installed Windows SDK
//!
//! A batch resolves one signing identity up front, locates the tool once,
//! then signs each artifact in input order, stopping at the first failure.

pub mod backend;
pub mod error;
pub mod identity;
pub mod invoker;
pub mod locator;
pub mod orchestrator;
pub mod request;
pub mod store;
pub mod stores;

pub use error::{Result, SigningError};
pub use identity::{is_fingerprint, SigningIdentity, StoreOrigin};
pub use invoker::{CommandLine, InvocationResult, ProcessInvoker, ToolInvoker};
pub use locator::{SdkVersion, ToolDescriptor};
pub use orchestrator::{BatchResult, FirstFailure, Orchestrator};
pub use request::{HashAlgorithm, SigningRequest};
pub use store::{CredentialStore, IdentityResolver};
