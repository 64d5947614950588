//! Score table produced by a screener run.

use std::cmp::Ordering;

use polars::prelude::*;
use prisma_traits::{PrismaError, Result, ScoreColumn, Symbol, columns};

/// Name of the row-wise total column.
pub const TOTAL_SCORE: &str = "TotalScore";

/// Per-instrument scores: `symbol`, one column per rule in configured order,
/// then `TotalScore`.
///
/// `TotalScore` is the sum of an instrument's defined rule scores; it is null
/// only when every rule score for that instrument is undefined. Rows keep the
/// portfolio order; use [`ScoreTable::ranked`] for a sorted view.
#[derive(Debug, Clone)]
pub struct ScoreTable {
    frame: DataFrame,
    rule_columns: Vec<String>,
}

impl ScoreTable {
    /// Assemble a table from symbols and rule score columns.
    ///
    /// # Errors
    ///
    /// Returns [`PrismaError::InvalidData`] if a column's length differs from
    /// the number of symbols, or [`PrismaError::Configuration`] if two columns
    /// share a name.
    pub fn new(symbols: Vec<Symbol>, scores: Vec<ScoreColumn>) -> Result<Self> {
        let rows = symbols.len();
        let mut totals: Vec<Option<f64>> = vec![None; rows];
        let mut frame_columns = Vec::with_capacity(scores.len() + 2);
        let mut rule_columns = Vec::with_capacity(scores.len());

        frame_columns.push(Column::new(columns::SYMBOL.into(), symbols));
        for column in scores {
            if column.len() != rows {
                return Err(PrismaError::InvalidData(format!(
                    "{} has {} scores for {} instruments",
                    column.name,
                    column.len(),
                    rows
                )));
            }
            if column.name == TOTAL_SCORE || rule_columns.contains(&column.name) {
                return Err(PrismaError::Configuration(format!(
                    "duplicate score column: {}",
                    column.name
                )));
            }

            for (total, score) in totals.iter_mut().zip(&column.scores) {
                if let Some(score) = score {
                    *total = Some(total.unwrap_or(0.0) + score);
                }
            }
            frame_columns.push(Column::new(column.name.as_str().into(), column.scores));
            rule_columns.push(column.name);
        }
        frame_columns.push(Column::new(TOTAL_SCORE.into(), totals));

        Ok(Self {
            frame: DataFrame::new(frame_columns)?,
            rule_columns,
        })
    }

    /// The underlying `DataFrame`.
    #[must_use]
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Consume the table, returning the `DataFrame`.
    #[must_use]
    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    /// Number of instruments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Rule score column names in configured order.
    #[must_use]
    pub fn rule_columns(&self) -> &[String] {
        &self.rule_columns
    }

    /// Symbols in row order.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol column cannot be read.
    pub fn symbols(&self) -> Result<Vec<Symbol>> {
        let symbols = self
            .frame
            .column(columns::SYMBOL)?
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|s: Option<&str>| s.unwrap_or_default().to_string())
            .collect();
        Ok(symbols)
    }

    /// Values of a score column, `None` where undefined.
    ///
    /// # Errors
    ///
    /// Returns [`PrismaError::MissingColumn`] if there is no such column.
    pub fn column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let column = self
            .frame
            .column(name)
            .map_err(|_| PrismaError::MissingColumn(name.to_string()))?;
        Ok(column.as_materialized_series().f64()?.into_iter().collect())
    }

    /// `TotalScore` per row.
    ///
    /// # Errors
    ///
    /// Returns an error if the total column cannot be read.
    pub fn total_scores(&self) -> Result<Vec<Option<f64>>> {
        self.column(TOTAL_SCORE)
    }

    /// `(symbol, TotalScore)` sorted by score descending, undefined totals
    /// last, ties broken by symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol or total column cannot be read.
    pub fn ranked(&self) -> Result<Vec<(Symbol, Option<f64>)>> {
        let mut rows: Vec<(Symbol, Option<f64>)> =
            self.symbols()?.into_iter().zip(self.total_scores()?).collect();
        rows.sort_by(|a, b| {
            let by_score = match (a.1, b.1) {
                (Some(x), Some(y)) => y.total_cmp(&x),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            by_score.then_with(|| a.0.cmp(&b.0))
        });
        Ok(rows)
    }
}
