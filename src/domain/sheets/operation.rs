use strum::{Display, EnumString};

/// Write semantics requested on the append endpoint. Matching is exact and
/// case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum WriteOperation {
    Append,
}
