/// SQL keywords, operators and punctuation used by the builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum Token {
    // Keywords
    SELECT,
    FROM,
    WHERE,
    WITH,
    RECURSIVE,
    AS,
    UNION,
    INNER,
    JOIN,
    ON,
    ORDER,
    BY,
    DESC,
    AND,
    OR,
    NOT,
    IN,
    IS,
    NULL,
    LIKE,
    BETWEEN,

    // Punctuation
    STAR,
    LPAREN,
    RPAREN,
    COMMA,
    DOT,

    // Comparison operators
    EQ,
    NE,
    LT,
    GT,
    LE,
    GE,
}

impl Token {
    /// Rendered text of the token.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Token::SELECT => "SELECT",
            Token::FROM => "FROM",
            Token::WHERE => "WHERE",
            Token::WITH => "WITH",
            Token::RECURSIVE => "RECURSIVE",
            Token::AS => "AS",
            Token::UNION => "UNION",
            Token::INNER => "INNER",
            Token::JOIN => "JOIN",
            Token::ON => "ON",
            Token::ORDER => "ORDER",
            Token::BY => "BY",
            Token::DESC => "DESC",
            Token::AND => "AND",
            Token::OR => "OR",
            Token::NOT => "NOT",
            Token::IN => "IN",
            Token::IS => "IS",
            Token::NULL => "NULL",
            Token::LIKE => "LIKE",
            Token::BETWEEN => "BETWEEN",
            Token::STAR => "*",
            Token::LPAREN => "(",
            Token::RPAREN => ")",
            Token::COMMA => ",",
            Token::DOT => ".",
            Token::EQ => "=",
            Token::NE => "<>",
            Token::LT => "<",
            Token::GT => ">",
            Token::LE => "<=",
            Token::GE => ">=",
        }
    }

    /// Comparison operators get a space on both sides.
    pub const fn is_operator(&self) -> bool {
        matches!(
            self,
            Token::EQ | Token::NE | Token::LT | Token::GT | Token::LE | Token::GE
        )
    }
}

impl core::fmt::Display for Token {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
