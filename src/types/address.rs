#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{error::Result, parse};

/// A mailbox as it appears in a From, To, Cc, Bcc or Reply-To header.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Address {
    name: Option<String>,
    address: String,
}

impl<N: Into<String>, A: Into<String>> From<(N, A)> for Address {
    fn from((name, address): (N, A)) -> Self {
        Self::new(Some(name.into()), address.into())
    }
}

impl From<&str> for Address {
    fn from(address: &str) -> Self {
        Self::new(None, address.to_string())
    }
}

impl From<String> for Address {
    fn from(address: String) -> Self {
        Self::new(None, address)
    }
}

impl From<&mailparse::SingleInfo> for Address {
    fn from(single: &mailparse::SingleInfo) -> Self {
        Address::new(single.display_name.clone(), single.addr.clone())
    }
}

impl Address {
    pub fn new(name: Option<String>, address: String) -> Self {
        Self { name, address }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn full(&self) -> String {
        match self.name.as_ref() {
            Some(name) => format!("{} <{}>", name, self.address),
            None => self.address.to_string(),
        }
    }

    /// Parse the value of an address list header. Groups are flattened into their members.
    pub fn from_header<H: Into<String>>(header: H) -> Result<Vec<Self>> {
        parse::address::address_list(header)
    }
}
