//! Single-line formatting of error chains, for use in log fields

use std::error::Error;
use std::fmt;

/// Display adapter printing an error followed by all its sources,
/// separated by `: `
pub struct CompactError<'e, E: ?Sized>(&'e E);

impl<E> fmt::Display for CompactError<'_, E>
where
    E: Error + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;

        let mut source = self.0.source();
        while let Some(err) = source {
            write!(f, ": {err}")?;
            source = err.source();
        }

        Ok(())
    }
}

pub trait FmtCompact {
    fn fmt_compact(&self) -> CompactError<'_, Self>;
}

impl<E> FmtCompact for E
where
    E: Error + ?Sized,
{
    fn fmt_compact(&self) -> CompactError<'_, Self> {
        CompactError(self)
    }
}

#[cfg(test)]
mod tests {
    use snafu::{ResultExt as _, Snafu};

    use super::FmtCompact as _;

    #[derive(Debug, Snafu)]
    #[snafu(display("inner failure"))]
    struct Inner;

    #[derive(Debug, Snafu)]
    #[snafu(display("outer failure"))]
    struct Outer {
        source: Inner,
    }

    #[test]
    fn prints_whole_chain() {
        let err = Err::<(), _>(Inner).context(OuterSnafu).unwrap_err();
        assert_eq!(err.fmt_compact().to_string(), "outer failure: inner failure");
    }

    #[test]
    fn prints_single_error() {
        assert_eq!(Inner.fmt_compact().to_string(), "inner failure");
    }
}
