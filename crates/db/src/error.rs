use std::convert::Infallible;
use std::io;

use redb_bincode::redb;
use snafu::{Location, Snafu};
use tokio::task::JoinError;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum DbError {
    #[snafu(display("Database error at {location}"))]
    Database {
        source: redb::DatabaseError,
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(transparent)]
    Table {
        source: redb::TableError,
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(transparent)]
    Storage {
        source: redb::StorageError,
        #[snafu(implicit)]
        location: Location,
    },
    Transaction {
        source: redb::TransactionError,
        #[snafu(implicit)]
        location: Location,
    },
    Join {
        source: JoinError,
        #[snafu(implicit)]
        location: Location,
    },
    Commit {
        source: redb::CommitError,
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(transparent)]
    Io {
        source: io::Error,
        #[snafu(implicit)]
        location: Location,
    },
    InvalidPath {
        #[snafu(implicit)]
        location: Location,
    },
}

pub type DbResult<T> = std::result::Result<T, DbError>;

/// Database transaction error with a user-defined application error
///
/// Either a database issue bubbling up, or whatever error `E` the
/// transaction logic needs to abort the transaction with.
///
/// See [`DbTxError::tx_into`] and [`DbTxError::map`] for converting
/// between transaction error types.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum DbTxError<E>
where
    E: snafu::Error + 'static,
{
    #[snafu(transparent)]
    DbError {
        source: DbError,

        #[snafu(implicit)]
        location: Location,
    },
    TxError {
        source: E,
        #[snafu(implicit)]
        location: Location,
    },
}

/// A `Result` with `T` as success, and [`DbTxError`] as the error.
pub type DbTxResult<T, E> = std::result::Result<T, DbTxError<E>>;

impl<E> From<redb::TableError> for DbTxError<E>
where
    E: snafu::Error,
{
    fn from(value: redb::TableError) -> Self {
        DbError::from(value).into()
    }
}

impl<E> From<redb::StorageError> for DbTxError<E>
where
    E: snafu::Error,
{
    fn from(value: redb::StorageError) -> Self {
        DbError::from(value).into()
    }
}

impl From<DbTxError<Infallible>> for DbError {
    fn from(value: DbTxError<Infallible>) -> Self {
        match value {
            DbTxError::DbError {
                source,
                location: _,
            } => source,
            DbTxError::TxError { source, .. } => match source {},
        }
    }
}

impl<E> DbTxError<E>
where
    E: snafu::Error,
{
    pub fn tx_into<E2>(self) -> DbTxError<E2>
    where
        E2: From<E> + snafu::Error,
    {
        self.map(E2::from)
    }

    pub fn map<E2>(self, f: impl FnOnce(E) -> E2) -> DbTxError<E2>
    where
        E2: snafu::Error,
    {
        match self {
            DbTxError::DbError { source, location } => DbTxError::DbError { source, location },
            DbTxError::TxError { source, location } => DbTxError::TxError {
                source: f(source),
                location,
            },
        }
    }
}
