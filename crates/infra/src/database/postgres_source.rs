//! PostgreSQL-backed transaction source
//!
//! Every call to [`PostgresTransactionSource::fetch_eligible`] opens its own
//! session, switches to the configured role, runs the eligibility query and
//! closes the session again. Nothing is shared between cycles, so
//! overlapping cycles never contend for a connection.

use async_trait::async_trait;
use pumpsync_core::TransactionSource;
use pumpsync_domain::{
    DatabaseConfig, ExtractionCriteria, PumpSyncError, Result, RowDecodeError, RowResult,
    TransactionRecord,
};
use tokio::task::JoinHandle;
use tokio_postgres::types::FromSql;
use tokio_postgres::{Client, Config as PgConfig, NoTls, Row};
use tracing::{debug, instrument, warn};

use crate::errors::InfraError;

const APPLICATION_NAME: &str = "pumpsync";

/// Transaction source reading from the site's PostgreSQL database.
pub struct PostgresTransactionSource {
    config: DatabaseConfig,
    query: String,
}

/// An open session. Dropping it closes the connection and stops its driver.
struct Session {
    client: Client,
    driver: JoinHandle<()>,
}

impl Drop for Session {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

impl PostgresTransactionSource {
    pub fn new(config: DatabaseConfig) -> Self {
        let query = eligible_transactions_query(&config.schema);
        Self { config, query }
    }

    /// Connection parameters for one session.
    pub fn pg_config(&self) -> PgConfig {
        let mut pg = PgConfig::new();
        pg.host(&self.config.host)
            .port(self.config.port)
            .dbname(&self.config.database)
            .user(&self.config.user)
            .password(&self.config.password)
            .application_name(APPLICATION_NAME);

        if let Some(timeout) = self.config.connect_timeout() {
            pg.connect_timeout(timeout);
        }

        pg
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    async fn open_session(&self) -> Result<Session> {
        let (client, connection) = self
            .pg_config()
            .connect(NoTls)
            .await
            .map_err(|e| PumpSyncError::from(InfraError::from(e)))?;

        let driver = tokio::spawn(async move {
            if let Err(err) = connection.await {
                warn!(error = %err, "Database connection terminated with error");
            }
        });

        let session = Session { client, driver };

        let statement = format!("SET SESSION AUTHORIZATION {}", quote_identifier(&self.config.role));
        session.client.batch_execute(&statement).await.map_err(|e| {
            let cause = PumpSyncError::from(InfraError::from(e));
            PumpSyncError::RoleSwitch(format!("role {}: {cause}", self.config.role))
        })?;

        debug!(host = %self.config.host, role = %self.config.role, "Database session opened");
        Ok(session)
    }
}

#[async_trait]
impl TransactionSource for PostgresTransactionSource {
    #[instrument(skip(self, criteria), fields(host = %self.config.host, db = %self.config.database))]
    async fn fetch_eligible(&self, criteria: &ExtractionCriteria) -> Result<Vec<RowResult>> {
        let session = self.open_session().await?;

        let company_id = criteria.company_id();
        let lookback_secs = criteria.lookback_seconds();

        let rows = session
            .client
            .query(self.query.as_str(), &[&company_id, &lookback_secs])
            .await
            .map_err(|e| PumpSyncError::from(InfraError::from(e)))?;

        debug!(rows = rows.len(), "Eligible transactions fetched");

        Ok(rows.iter().enumerate().map(|(position, row)| decode_row(position, row)).collect())
    }
}

/// Typed, positional access to the columns of one result row.
trait Columns {
    fn column<'a, T: FromSql<'a>>(&'a self, idx: usize) -> std::result::Result<T, String>;
}

impl Columns for Row {
    fn column<'a, T: FromSql<'a>>(&'a self, idx: usize) -> std::result::Result<T, String> {
        self.try_get(idx).map_err(|err| err.to_string())
    }
}

/// Decode one result row. Column order follows [`eligible_transactions_query`].
fn decode_row<C: Columns>(position: usize, row: &C) -> RowResult {
    let decode = || -> std::result::Result<TransactionRecord, String> {
        Ok(TransactionRecord {
            transaction_id: row.column(0)?,
            timestamp: row.column(1)?,
            volume: row.column(2)?,
            unit_price: row.column(3)?,
            total_value: row.column(4)?,
            processed_flag: row.column(5)?,
            nozzle_label: row.column(6)?,
            nozzle_number: row.column(7)?,
            company_label: row.column(8)?,
        })
    };

    decode().map_err(|message| RowDecodeError::new(position, message))
}

/// Eligible transactions for one tenant inside the trailing window.
///
/// `$1` is the tenant id, `$2` the lookback in seconds. `NOW()` is taken
/// from the database clock. Output columns are cast so decoding does not
/// depend on the exact column types of a given installation; the timestamp
/// cast keeps the wall-clock value as the session renders it.
pub fn eligible_transactions_query(schema: &str) -> String {
    let schema = quote_identifier(schema);
    format!(
        "SELECT \
            a.cdabastecimento::int8, \
            a.dhabastecimento::timestamp, \
            a.qtvolume::float8, \
            a.vlunitario::float8, \
            a.vltotal::float8, \
            a.fllancado::int4, \
            b.dsbico::text, \
            b.nrbico::int4, \
            e.dsapelido::text \
        FROM {schema}.abastecimento a \
        JOIN {schema}.bico b ON a.cdbico = b.cdbico \
        JOIN {schema}.empresa e ON a.cdempresa = e.cdempresa \
        WHERE a.fllancado = 0 \
            AND a.flcancelado = 0 \
            AND a.fltipo = 0 \
            AND a.dhabastecimento >= (NOW() - make_interval(secs => $2::float8)) \
            AND a.cdempresa = $1::int8 \
        ORDER BY a.dhprocessamento DESC"
    )
}

/// Quote a PostgreSQL identifier.
///
/// Embedded double quotes are doubled and anything after a NUL byte is
/// dropped, since the server would reject it anyway.
pub fn quote_identifier(name: &str) -> String {
    let name = name.split('\0').next().unwrap_or_default();
    format!("\"{}\"", name.replace('"', "\"\""))
}
