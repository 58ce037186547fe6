use mailparse::{MailAddr, MailAddrList, MailHeader};

use crate::{
    error::{Error, ErrorKind, Result},
    types::Address,
};

fn flatten(list: &MailAddrList) -> Vec<Address> {
    let mut addresses = Vec::new();

    for address in list.iter() {
        match address {
            MailAddr::Group(group) => {
                for single in &group.addrs {
                    addresses.push(single.into());
                }
            }
            MailAddr::Single(single) => {
                addresses.push(single.into());
            }
        }
    }

    addresses
}

/// Parse the value of an address list header. Groups are flattened into their members.
pub fn address_list<H: Into<String>>(header: H) -> Result<Vec<Address>> {
    let header = header.into();

    if header.trim().is_empty() {
        return Ok(Vec::new());
    }

    let list = mailparse::addrparse(&header).map_err(|e| {
        Error::new(
            ErrorKind::ParseAddress,
            format!("Failed to parse address list '{}': {}", header, e),
        )
    })?;

    Ok(flatten(&list))
}

/// Parse an address list header as it appears in a message, decoding encoded words
/// per token so a decoded display name never splits an address.
pub fn header_address_list(header: &MailHeader<'_>) -> Result<Vec<Address>> {
    let list = mailparse::addrparse_header(header).map_err(|e| {
        Error::new(
            ErrorKind::ParseAddress,
            format!(
                "Failed to parse {} header '{}': {}",
                header.get_key(),
                header.get_value(),
                e
            ),
        )
    })?;

    Ok(flatten(&list))
}
