use std::io::{BufReader, Read};

use serde::de::DeserializeOwned;

pub fn toml_from_reader<R, T>(reader: R) -> anyhow::Result<T>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut reader = BufReader::new(reader);
    let mut data = String::with_capacity(4 * 1024);
    reader.read_to_string(&mut data)?;
    Ok(toml::from_str(&data)?)
}

pub mod serde_toml_local_date {
    use core::fmt;

    use toml::value::{Date, Datetime};

    use serde::de::{self, Deserialize};

    // NOTE: `toml::value::Datetime` is used, because
    // `toml::value::Date` does not implement `Deserialize`

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: de::Deserializer<'de>,
        T: TryFrom<Date>,
        T::Error: fmt::Display,
    {
        let date = Datetime::deserialize(deserializer)?
            .date
            .ok_or_else(|| de::Error::custom("expected a date"))?;

        T::try_from(date).map_err(de::Error::custom)
    }

    /// For `Option<Date>` fields: combine with `#[serde(default)]`.
    pub mod option {
        use core::fmt;

        use serde::de::Deserializer;
        use toml::value::Date;

        pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
        where
            D: Deserializer<'de>,
            T: TryFrom<Date>,
            T::Error: fmt::Display,
        {
            super::deserialize(deserializer).map(Some)
        }
    }
}

pub trait StrExt {
    fn split_exact<const N: usize>(&self, pat: &str) -> [Option<&str>; N];
}

impl StrExt for str {
    fn split_exact<const N: usize>(&self, pat: &str) -> [Option<&str>; N] {
        let mut split = self.splitn(N, pat);
        [(); N].map(|_| split.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_exact() {
        assert_eq!(
            "2022-01-31".split_exact::<3>("-"),
            [Some("2022"), Some("01"), Some("31")]
        );
        assert_eq!(
            "2022-01".split_exact::<3>("-"),
            [Some("2022"), Some("01"), None]
        );
    }
}
