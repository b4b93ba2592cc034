pub mod fill;
pub mod form;
pub mod system;

use crate::{
    cli::{core::CommandError, registry::CommandRegistry},
    core::services::DropSlot,
};

pub fn register_all(registry: &mut CommandRegistry) {
    for entry in system::definitions()
        .into_iter()
        .chain(form::definitions())
        .chain(fill::definitions())
    {
        registry.register(entry);
    }
}

pub(crate) fn required_arg<'a>(
    args: &[&'a str],
    index: usize,
    usage: &str,
) -> Result<&'a str, CommandError> {
    args.get(index)
        .copied()
        .ok_or_else(|| CommandError::InvalidArguments(format!("Usage: {}", usage)))
}

pub(crate) fn parse_bool(value: &str) -> Result<bool, CommandError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "on" => Ok(true),
        "false" | "no" | "n" | "0" | "off" => Ok(false),
        other => Err(CommandError::InvalidArguments(format!(
            "expected yes/no, got `{}`",
            other
        ))),
    }
}

/// `3` drops before the field at index 3, `beside:<id>` fills the empty
/// column next to a lone half-width field.
pub(crate) fn parse_slot(value: Option<&str>, len: usize) -> Result<DropSlot, CommandError> {
    let Some(raw) = value else {
        return Ok(DropSlot::Index(len));
    };
    if let Some(anchor) = raw.strip_prefix("beside:") {
        return Ok(DropSlot::InlineBeside(anchor.to_string()));
    }
    raw.parse::<usize>()
        .map(DropSlot::Index)
        .map_err(|_| CommandError::InvalidArguments(format!("invalid position `{}`", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_parse_from_index_or_anchor() {
        assert_eq!(parse_slot(None, 4).unwrap(), DropSlot::Index(4));
        assert_eq!(parse_slot(Some("1"), 4).unwrap(), DropSlot::Index(1));
        assert_eq!(
            parse_slot(Some("beside:email"), 4).unwrap(),
            DropSlot::InlineBeside("email".into())
        );
        assert!(parse_slot(Some("top"), 4).is_err());
    }

    #[test]
    fn bools_accept_common_spellings() {
        assert!(parse_bool("Yes").unwrap());
        assert!(!parse_bool("off").unwrap());
        assert!(parse_bool("maybe").is_err());
    }
}
