//! Date and time predicates.

use super::{ColumnRef, QueryBuilder, TableResolver};
use crate::ast::{IntoNode, Node, Operator};
use crate::error::{ExprError, ExprResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

/// Interval text for `INTERVAL '<text>'`.
///
/// Durations become whole seconds (`30 days` is `'2592000'`); text is passed
/// through as written (`'1 day'`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval(String);

impl Interval {
    pub fn seconds(secs: i64) -> Self {
        Interval(secs.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Interval {
    fn from(text: &str) -> Self {
        Interval(text.to_string())
    }
}

impl From<String> for Interval {
    fn from(text: String) -> Self {
        Interval(text)
    }
}

impl From<TimeDelta> for Interval {
    fn from(delta: TimeDelta) -> Self {
        Interval::seconds(delta.num_seconds())
    }
}

impl From<std::time::Duration> for Interval {
    fn from(duration: std::time::Duration) -> Self {
        Interval(duration.as_secs().to_string())
    }
}

/// Anything naming a calendar day.
pub trait IntoDay {
    fn into_day(self) -> ExprResult<NaiveDate>;
}

impl IntoDay for NaiveDate {
    fn into_day(self) -> ExprResult<NaiveDate> {
        Ok(self)
    }
}

impl IntoDay for NaiveDateTime {
    fn into_day(self) -> ExprResult<NaiveDate> {
        Ok(self.date())
    }
}

impl IntoDay for DateTime<Utc> {
    fn into_day(self) -> ExprResult<NaiveDate> {
        Ok(self.date_naive())
    }
}

/// `YYYY-MM-DD`, optionally followed by a time part.
impl IntoDay for &str {
    fn into_day(self) -> ExprResult<NaiveDate> {
        let text = self.trim();
        let date_part = text.get(..10).unwrap_or(text);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .map_err(|e| ExprError::validation(format!("invalid date '{text}': {e}")))
    }
}

fn end_of_day(day: NaiveDate) -> ExprResult<NaiveDateTime> {
    day.and_hms_micro_opt(23, 59, 59, 999_999)
        .ok_or_else(|| ExprError::validation(format!("no end of day for {day}")))
}

impl<R: TableResolver> QueryBuilder<'_, R> {
    /// `column <= t`
    pub fn date_before(&self, column: impl Into<ColumnRef>, t: impl IntoNode) -> Node {
        self.attr(column).lteq(t)
    }

    /// `column >= t`
    pub fn date_after(&self, column: impl Into<ColumnRef>, t: impl IntoNode) -> Node {
        self.attr(column).gteq(t)
    }

    /// `column BETWEEN lo AND hi`
    pub fn date_between(
        &self,
        column: impl Into<ColumnRef>,
        lo: impl IntoNode,
        hi: impl IntoNode,
    ) -> Node {
        self.attr(column).between(lo, hi)
    }

    /// `column BETWEEN 'YYYY-01-01 00:00:00' AND 'YYYY-12-31 23:59:59.999999'`
    pub fn date_in_year(&self, column: impl Into<ColumnRef>, year: i32) -> ExprResult<Node> {
        let first = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| ExprError::validation(format!("year {year} is out of range")))?;
        let last = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| ExprError::validation(format!("year {year} is out of range")))?;
        Ok(self.date_between(column, first.and_time(NaiveTime::MIN), end_of_day(last)?))
    }

    /// `column >= <start of the day `ago` before now>`
    pub fn date_since(&self, column: impl Into<ColumnRef>, ago: TimeDelta) -> ExprResult<Node> {
        let since = self
            .clock
            .now()
            .checked_sub_signed(ago)
            .ok_or_else(|| ExprError::validation(format!("duration {ago} is out of range")))?;
        Ok(self.date_after(column, since.date_naive().and_time(NaiveTime::MIN)))
    }

    /// `column <= now`
    pub fn date_before_now(&self, column: impl Into<ColumnRef>) -> Node {
        self.date_before(column, self.clock.now())
    }

    /// `column >= now`
    pub fn date_after_now(&self, column: impl Into<ColumnRef>) -> Node {
        self.date_after(column, self.clock.now())
    }

    /// `column <= CURRENT_TIMESTAMP - INTERVAL '<interval>'`
    pub fn date_before_interval(
        &self,
        column: impl Into<ColumnRef>,
        interval: impl Into<Interval>,
    ) -> Node {
        self.date_before(column, interval_ago(interval.into()))
    }

    /// `column >= CURRENT_TIMESTAMP - INTERVAL '<interval>'`
    pub fn date_after_interval(
        &self,
        column: impl Into<ColumnRef>,
        interval: impl Into<Interval>,
    ) -> Node {
        self.date_after(column, interval_ago(interval.into()))
    }

    /// `(column IS NULL OR column <= t)`
    pub fn date_null_or_before(&self, column: impl Into<ColumnRef>, t: impl IntoNode) -> Node {
        let column = self.attr(column);
        self.is_null(&column).or(self.date_before(column, t))
    }

    /// `(column IS NULL OR column >= t)`
    pub fn date_null_or_after(&self, column: impl Into<ColumnRef>, t: impl IntoNode) -> Node {
        let column = self.attr(column);
        self.is_null(&column).or(self.date_after(column, t))
    }

    pub fn date_null_or_before_now(&self, column: impl Into<ColumnRef>) -> Node {
        self.date_null_or_before(column, self.clock.now())
    }

    pub fn date_null_or_after_now(&self, column: impl Into<ColumnRef>) -> Node {
        self.date_null_or_after(column, self.clock.now())
    }

    /// `column >= 'D 00:00:00' AND column <= 'D 23:59:59.999999'`
    pub fn date_on_day(&self, column: impl Into<ColumnRef>, day: impl IntoDay) -> ExprResult<Node> {
        let day = day.into_day()?;
        let column = self.attr(column);
        let start = day.and_time(NaiveTime::MIN);
        let end = end_of_day(day)?;
        Ok(self.date_after(&column, start).and(self.date_before(column, end)))
    }

    /// Rows sorting before `(date, id)` in `(column, primary key)` order:
    /// `(column < date OR column = date AND id < id)`.
    pub fn earlier_entries(
        &self,
        column: impl Into<ColumnRef>,
        date: impl IntoNode,
        id: impl IntoNode,
    ) -> Node {
        let column = self.attr(column);
        let date = date.into_node();
        let tie = column.clone().eq(&date).and(self.primary_key().lt(id));
        column.lt(date).or(tie)
    }

    /// Rows sorting after `(date, id)` in `(column, primary key)` order.
    pub fn later_entries(
        &self,
        column: impl Into<ColumnRef>,
        date: impl IntoNode,
        id: impl IntoNode,
    ) -> Node {
        let column = self.attr(column);
        let date = date.into_node();
        let tie = column.clone().eq(&date).and(self.primary_key().gt(id));
        column.gt(date).or(tie)
    }
}

/// `CURRENT_TIMESTAMP - INTERVAL '<text>'`
fn interval_ago(interval: Interval) -> Node {
    Node::raw("CURRENT_TIMESTAMP").minus(Node::unary(
        Operator::INTERVAL,
        Node::literal(interval.0),
    ))
}
