//! Enumerated text codes stored in quoted single-field columns.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Text that is not one of a code's known values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {code} code {value:?}")]
pub struct UnknownCode {
    pub code: &'static str,
    pub value: String,
}

/// Change operation applied by a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Op {
    #[default]
    Add,
    Modify,
    Remove,
}

/// Registry condition of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Condition {
    #[default]
    Registry,
    Planned,
}

/// Circuit end where flow is metered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MeteringEnd {
    #[default]
    From,
    To,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GeneratorType {
    Hydro,
    #[default]
    Thermal,
    Renewable,
    Synchronous,
    Statcom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusShuntType {
    #[default]
    Reactor,
    Capacitor,
}

/// Line end a line shunt is connected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ShuntTerminal {
    #[default]
    From,
    To,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DcLinkType {
    #[default]
    Lcc,
    Vsc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DcPolarity {
    #[default]
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LccConverterType {
    #[default]
    Rectifier,
    Inverter,
    Bidirectional,
}

/// Mapping between a code enum and its on-disk text.
pub trait Code: Sized + Copy + 'static {
    /// Name used in error messages.
    const NAME: &'static str;
    /// Every variant with its text, in declaration order.
    const TABLE: &'static [(Self, &'static str)];

    fn code(&self) -> &'static str;

    fn parse_code(text: &str) -> Result<Self, UnknownCode> {
        let text = text.trim();
        Self::TABLE
            .iter()
            .find(|(_, code)| *code == text)
            .map(|(value, _)| *value)
            .ok_or_else(|| UnknownCode {
                code: Self::NAME,
                value: text.to_string(),
            })
    }
}

macro_rules! impl_code {
    ($ty:ident, $name:literal, [ $( $variant:ident => $text:literal ),+ $(,)? ]) => {
        impl Code for $ty {
            const NAME: &'static str = $name;
            const TABLE: &'static [(Self, &'static str)] = &[ $( ($ty::$variant, $text) ),+ ];

            fn code(&self) -> &'static str {
                match self {
                    $( $ty::$variant => $text, )+
                }
            }
        }

        impl FromStr for $ty {
            type Err = UnknownCode;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as Code>::parse_code(s)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}

impl_code!(Op, "operation", [Add => "A", Modify => "M", Remove => "R"]);
impl_code!(Condition, "condition", [Registry => "R", Planned => "P"]);
impl_code!(MeteringEnd, "metering end", [From => "F", To => "T"]);
impl_code!(GeneratorType, "generator type", [
    Hydro => "H",
    Thermal => "T",
    Renewable => "R",
    Synchronous => "S",
    Statcom => "V",
]);
impl_code!(BusShuntType, "bus shunt type", [Reactor => "R", Capacitor => "C"]);
impl_code!(ShuntTerminal, "shunt terminal", [From => "F", To => "T"]);
impl_code!(DcLinkType, "DC link type", [Lcc => "LCC", Vsc => "VSC"]);
impl_code!(DcPolarity, "DC polarity", [Positive => "+", Negative => "-", Neutral => "0"]);
impl_code!(LccConverterType, "LCC converter type", [
    Rectifier => "R",
    Inverter => "I",
    Bidirectional => "B",
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_parse_and_render() {
        assert_eq!("A".parse::<Op>().unwrap(), Op::Add);
        assert_eq!(" P ".parse::<Condition>().unwrap(), Condition::Planned);
        assert_eq!("VSC".parse::<DcLinkType>().unwrap(), DcLinkType::Vsc);
        assert_eq!(DcPolarity::Negative.to_string(), "-");
        assert_eq!(GeneratorType::default().code(), "T");
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = "X".parse::<MeteringEnd>().unwrap_err();
        assert_eq!(err.code, "metering end");
        assert_eq!(err.value, "X");
        assert!("".parse::<Op>().is_err());
    }

    #[test]
    fn tables_cover_every_variant_once() {
        fn check<T: Code + PartialEq + std::fmt::Debug>() {
            for (value, text) in T::TABLE {
                assert_eq!(value.code(), *text);
                assert_eq!(T::parse_code(text).unwrap(), *value);
            }
        }
        check::<Op>();
        check::<Condition>();
        check::<MeteringEnd>();
        check::<GeneratorType>();
        check::<BusShuntType>();
        check::<ShuntTerminal>();
        check::<DcLinkType>();
        check::<DcPolarity>();
        check::<LccConverterType>();
    }
}
