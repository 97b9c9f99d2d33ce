//! Mock gateways and a scripted transport for testing.
//!
//! [`MockTransport`] replays canned HTTP outcomes and records what was
//! sent; [`MockGateway`] and [`MockAccountGateway`] are real gateway
//! implementations wired to it, registered under
//! `"\Passerelle\Mock\Gateway"` and `"\Passerelle\Mock\Account\Gateway"`.

mod gateway;
mod transport;

pub use gateway::{MockAccountGateway, MockGateway, MockRequest, MockResponse};
pub use transport::{MockTransport, RecordedRequest};
