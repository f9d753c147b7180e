//! `--block` arguments such as `deep:60:Writing,Email` or `break:10`.

use deepwork_core::models::BlockKind;

/// One block as typed on the command line. Categories are still names here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSpec {
    pub kind: BlockKind,
    pub minutes: u64,
    pub categories: Vec<String>,
}

impl BlockSpec {
    /// Parses `<kind>:<minutes>[:<category>[,<category>...]]`.
    pub fn parse(s: &str) -> Result<Self, String> {
        let mut parts = s.splitn(3, ':');
        let kind = parts.next().unwrap_or_default().trim();
        let kind = parse_kind(kind)
            .ok_or_else(|| format!("unknown block kind '{kind}' (use deep, shallow or break)"))?;

        let minutes = parts
            .next()
            .ok_or_else(|| format!("missing duration in '{s}'"))?
            .trim();
        let minutes = minutes
            .parse::<u64>()
            .ok()
            .filter(|m| m.checked_mul(60).is_some())
            .ok_or_else(|| format!("duration must be whole minutes, got '{minutes}'"))?;

        let categories: Vec<String> = parts
            .next()
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if kind.is_break() && !categories.is_empty() {
            return Err("breaks can't have categories".to_string());
        }

        Ok(Self {
            kind,
            minutes,
            categories,
        })
    }
}

fn parse_kind(s: &str) -> Option<BlockKind> {
    match s.to_ascii_lowercase().as_str() {
        "deep" | "deep_work" => Some(BlockKind::DeepWork),
        "shallow" | "shallow_work" => Some(BlockKind::ShallowWork),
        "break" | "rest" => Some(BlockKind::Break),
        _ => None,
    }
}
