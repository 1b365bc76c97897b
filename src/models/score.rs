//! 1-5 score fields
//!
//! Input accepts any whole number. Values beyond the `u8` range saturate,
//! which keeps them outside 1-5, so the `validator` range rules report them
//! like any other out-of-range score.

use serde::{Deserialize, Deserializer};

pub fn clamp_score(value: i64) -> u8 {
    value.clamp(0, i64::from(u8::MAX)) as u8
}

pub fn whole<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    i64::deserialize(deserializer).map(clamp_score)
}

pub fn optional<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.map(clamp_score))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_keeps_scale_and_saturates_outside() {
        assert_eq!(clamp_score(4), 4);
        assert_eq!(clamp_score(300), u8::MAX);
        assert_eq!(clamp_score(-1), 0);
    }
}
