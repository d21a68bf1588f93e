//! Call and outcome types
//!
//! A [`ChaincodeCall`] names a deployed chaincode, a function, and its
//! arguments. Outcomes carry the raw payload; invocations additionally carry
//! the transaction id assigned on submission.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Coordinates of a deployed chaincode.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChaincodeId {
    /// Channel the chaincode is committed to
    pub channel: String,
    /// Chaincode name on that channel
    pub name: String,
    /// Pinned version, or `None` for whatever is committed
    pub version: Option<String>,
}

impl ChaincodeId {
    /// Creates an unversioned chaincode id
    pub fn new(channel: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            name: name.into(),
            version: None,
        }
    }

    /// Pins the id to a version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

impl fmt::Display for ChaincodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}/{}@{}", self.channel, self.name, version),
            None => write!(f, "{}/{}", self.channel, self.name),
        }
    }
}

/// A single chaincode function call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodeCall {
    /// Target chaincode
    pub chaincode: ChaincodeId,
    /// Function name within the chaincode
    pub function: String,
    /// Positional string arguments, in submission order
    pub args: Vec<String>,
}

impl ChaincodeCall {
    /// Creates a call with no arguments
    pub fn new(chaincode: ChaincodeId, function: impl Into<String>) -> Self {
        Self {
            chaincode,
            function: function.into(),
            args: Vec::new(),
        }
    }

    /// Appends one argument
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for ChaincodeCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{}({} args)",
            self.chaincode,
            self.function,
            self.args.len()
        )
    }
}

/// Result of a submitted (state-changing) call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeOutcome {
    /// Transaction id assigned on submission
    pub transaction_id: Uuid,
    /// Raw response payload
    pub payload: Vec<u8>,
}

impl InvokeOutcome {
    /// Returns the payload as UTF-8 text when it is valid UTF-8
    pub fn payload_utf8(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.payload)
    }
}

/// Result of an evaluated (read-only) call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOutcome {
    /// Raw response payload
    pub payload: Vec<u8>,
}

impl QueryOutcome {
    /// Returns the payload as UTF-8 text when it is valid UTF-8
    pub fn payload_utf8(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chaincode_id_display() {
        let id = ChaincodeId::new("trading", "assets");
        assert_eq!(id.to_string(), "trading/assets");

        let pinned = id.with_version("1.2");
        assert_eq!(pinned.to_string(), "trading/assets@1.2");
    }

    #[test]
    fn test_call_builder_collects_args() {
        let call = ChaincodeCall::new(ChaincodeId::new("trading", "assets"), "transfer")
            .with_arg("asset-1")
            .with_args(["alice", "bob"]);

        assert_eq!(call.function, "transfer");
        assert_eq!(call.args, vec!["asset-1", "alice", "bob"]);
        assert_eq!(call.to_string(), "trading/assets::transfer(3 args)");
    }

    #[test]
    fn test_payload_utf8() {
        let outcome = QueryOutcome {
            payload: b"asset-1".to_vec(),
        };
        assert_eq!(outcome.payload_utf8().unwrap(), "asset-1");

        let binary = QueryOutcome {
            payload: vec![0xff, 0xfe],
        };
        assert!(binary.payload_utf8().is_err());
    }
}
