use crate::{
    sql::{SQL, SQLChunk, Token},
    traits::ToSQL,
    values::Value,
};

/// Format a SQL comparison with the given operator
fn internal_format_sql_comparison<L, R>(left: L, operator: Token, right: R) -> SQL
where
    L: ToSQL,
    R: ToSQL,
{
    left.into_sql().push(operator).append(right.into_sql())
}

/// Create an equality condition (=)
///
/// # Example
/// ```
/// # use canopy_core::expressions::{col, eq};
/// let condition = eq(col("name"), "Item A");
/// assert_eq!(condition.sql(), r#""name" = ?"#);
/// ```
pub fn eq<L: ToSQL, R: ToSQL>(left: L, right: R) -> SQL {
    internal_format_sql_comparison(left, Token::EQ, right)
}

/// Create a not-equal condition (<>)
pub fn neq<L: ToSQL, R: ToSQL>(left: L, right: R) -> SQL {
    internal_format_sql_comparison(left, Token::NE, right)
}

/// Create a greater-than condition (>)
///
/// # Example
/// ```
/// # use canopy_core::expressions::{col, gt};
/// let condition = gt(col("id"), 1);
/// assert_eq!(condition.sql(), r#""id" > ?"#);
/// ```
pub fn gt<L: ToSQL, R: ToSQL>(left: L, right: R) -> SQL {
    internal_format_sql_comparison(left, Token::GT, right)
}

/// Create a greater-than-or-equal condition (>=)
pub fn gte<L: ToSQL, R: ToSQL>(left: L, right: R) -> SQL {
    internal_format_sql_comparison(left, Token::GE, right)
}

/// Create a less-than condition (<)
pub fn lt<L: ToSQL, R: ToSQL>(left: L, right: R) -> SQL {
    internal_format_sql_comparison(left, Token::LT, right)
}

/// Create a less-than-or-equal condition (<=)
pub fn lte<L: ToSQL, R: ToSQL>(left: L, right: R) -> SQL {
    internal_format_sql_comparison(left, Token::LE, right)
}

/// Create a LIKE condition for pattern matching
pub fn like<L: ToSQL, R: ToSQL>(left: L, pattern: R) -> SQL {
    left.into_sql().push(Token::LIKE).append(pattern.into_sql())
}

/// Create a NOT LIKE condition for pattern matching
pub fn not_like<L: ToSQL, R: ToSQL>(left: L, pattern: R) -> SQL {
    left.into_sql()
        .push(Token::NOT)
        .push(Token::LIKE)
        .append(pattern.into_sql())
}

/// Create a BETWEEN condition
pub fn between<L, R1, R2>(left: L, start: R1, end: R2) -> SQL
where
    L: ToSQL,
    R1: ToSQL,
    R2: ToSQL,
{
    left.into_sql()
        .push(Token::BETWEEN)
        .append(start.into_sql())
        .push(Token::AND)
        .append(end.into_sql())
        .parens()
}

/// Create an IS NULL condition
pub fn is_null<L: ToSQL>(left: L) -> SQL {
    left.into_sql().push(Token::IS).push(Token::NULL)
}

/// Create an IS NOT NULL condition
pub fn is_not_null<L: ToSQL>(left: L) -> SQL {
    left.into_sql()
        .push(Token::IS)
        .push(Token::NOT)
        .push(Token::NULL)
}

/// Create an IN condition over a list of values.
///
/// An empty list renders `IN (NULL)`, which matches nothing on every store.
///
/// # Example
/// ```
/// # use canopy_core::expressions::{col, is_in};
/// let condition = is_in(col("id"), [1, 2]);
/// assert_eq!(condition.sql(), r#""id" IN (?, ?)"#);
/// ```
pub fn is_in<L, I>(left: L, values: I) -> SQL
where
    L: ToSQL,
    I: IntoIterator,
    I::Item: Into<Value>,
{
    in_list(left.into_sql().push(Token::IN), values)
}

/// Create a NOT IN condition over a list of values.
pub fn not_in<L, I>(left: L, values: I) -> SQL
where
    L: ToSQL,
    I: IntoIterator,
    I::Item: Into<Value>,
{
    in_list(left.into_sql().push(Token::NOT).push(Token::IN), values)
}

fn in_list<I>(head: SQL, values: I) -> SQL
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let list = SQL::param_list(values);
    if list.is_empty() {
        head.append(SQL::token(Token::NULL).parens())
    } else {
        head.append(list.parens())
    }
}

/// Create an IN condition against a subquery
pub fn in_subquery<L: ToSQL, Q: ToSQL>(left: L, subquery: Q) -> SQL {
    left.into_sql()
        .push(Token::IN)
        .append(subquery.into_sql().parens())
}

/// Create a NOT condition
pub fn not<T: ToSQL>(expression: T) -> SQL {
    let expr_sql = expression.into_sql();
    let needs_paren = expr_sql.chunks.len() > 1;

    if needs_paren {
        SQL::token(Token::NOT).append(expr_sql.parens())
    } else {
        SQL::token(Token::NOT).append(expr_sql)
    }
}

/// Combine conditions with AND. Compound operands are parenthesized.
pub fn and<T>(conditions: T) -> SQL
where
    T: IntoIterator<Item = SQL>,
{
    combine(conditions, Token::AND)
}

/// Combine conditions with OR. Compound operands are parenthesized.
pub fn or<T>(conditions: T) -> SQL
where
    T: IntoIterator<Item = SQL>,
{
    combine(conditions, Token::OR)
}

fn combine<T>(conditions: T, operator: Token) -> SQL
where
    T: IntoIterator<Item = SQL>,
{
    let mut iter = conditions.into_iter().filter(|c| !c.is_empty());

    let Some(first) = iter.next() else {
        return SQL::empty();
    };
    let Some(second) = iter.next() else {
        return first;
    };

    let mut result = wrap_operand(first);
    for condition in core::iter::once(second).chain(iter) {
        result.push_mut(operator);
        result.append_mut(wrap_operand(condition));
    }
    result
}

fn wrap_operand(condition: SQL) -> SQL {
    let already_wrapped = matches!(condition.chunks.first(), Some(SQLChunk::Token(Token::LPAREN)))
        && matches!(condition.chunks.last(), Some(SQLChunk::Token(Token::RPAREN)))
        && balanced_outer_parens(&condition);
    if condition.chunks.len() > 1 && !already_wrapped {
        condition.parens()
    } else {
        condition
    }
}

/// True when the first `(` closes at the last chunk, i.e. `(a) AND (b)` is
/// not considered wrapped.
fn balanced_outer_parens(condition: &SQL) -> bool {
    let mut depth = 0usize;
    let last = condition.chunks.len() - 1;
    for (i, chunk) in condition.chunks.iter().enumerate() {
        match chunk {
            SQLChunk::Token(Token::LPAREN) => depth += 1,
            SQLChunk::Token(Token::RPAREN) => {
                depth = depth.saturating_sub(1);
                if depth == 0 && i != last {
                    return false;
                }
            }
            _ => {}
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expressions::col;

    #[test]
    fn comparisons_bind_parameters() {
        let condition = eq(col("name"), "USA");
        assert_eq!(condition.sql(), r#""name" = ?"#);
        assert_eq!(
            condition.params().collect::<Vec<_>>(),
            vec![&Value::Text("USA".into())]
        );

        assert_eq!(neq(col("id"), 3).sql(), r#""id" <> ?"#);
        assert_eq!(lte(col("id"), 3).sql(), r#""id" <= ?"#);
    }

    #[test]
    fn null_checks() {
        assert_eq!(is_null(col("parent_id")).sql(), r#""parent_id" IS NULL"#);
        assert_eq!(
            is_not_null(col("parent_id")).sql(),
            r#""parent_id" IS NOT NULL"#
        );
    }

    #[test]
    fn empty_in_list_matches_nothing() {
        assert_eq!(
            is_in(col("id"), Vec::<i64>::new()).sql(),
            r#""id" IN (NULL)"#
        );
        assert_eq!(not_in(col("id"), [4]).sql(), r#""id" NOT IN (?)"#);
    }

    #[test]
    fn and_or_parenthesize_compound_operands() {
        let condition = and([
            eq(col("a"), 1),
            or([eq(col("b"), 2), eq(col("c"), 3)]),
        ]);
        assert_eq!(
            condition.sql(),
            r#"("a" = ?) AND (("b" = ?) OR ("c" = ?))"#
        );
        assert_eq!(and([eq(col("a"), 1)]).sql(), r#""a" = ?"#);
        assert!(and(Vec::new()).is_empty());
    }

    #[test]
    fn between_and_not() {
        assert_eq!(
            between(col("id"), 1, 5).sql(),
            r#"("id" BETWEEN ? AND ?)"#
        );
        assert_eq!(not(eq(col("a"), 1)).sql(), r#"NOT ("a" = ?)"#);
    }
}
