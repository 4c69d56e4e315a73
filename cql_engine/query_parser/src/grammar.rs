// Copyright 2020 - present Alex Dukhno
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::{
    lexer::{Cursor, Lexeme},
    Dialect,
};
use diagnostics::{CompileError, SourceToken};
use filter_builder::{BuildError, GeometryRole, Production, Reducer};
use filter_tree::{ArithmeticOp, ComparisonOp, DistanceOperator, SpatialOperator};
use sqlparser::tokenizer::Token;

const ENVELOPE_COMPONENTS: usize = 4;
const BBOX_BOUNDS: usize = 4;
const MAX_NESTING: usize = 128;

/// Recursive descent over both dialects; every completed production is handed to the reducer
pub(crate) struct Grammar<'a, R: Reducer> {
    cursor: Cursor<'a>,
    reducer: R,
    dialect: Dialect,
    statement: &'a str,
    depth: usize,
}

impl<'a, R: Reducer> Grammar<'a, R> {
    pub(crate) fn new(cursor: Cursor<'a>, reducer: R, dialect: Dialect, statement: &'a str) -> Grammar<'a, R> {
        Grammar {
            cursor,
            reducer,
            dialect,
            statement,
            depth: 0,
        }
    }

    pub(crate) fn into_parts(self) -> (Cursor<'a>, R) {
        (self.cursor, self.reducer)
    }

    pub(crate) fn filter(&mut self) -> Result<(), BuildError> {
        self.disjunction()
    }

    pub(crate) fn expression(&mut self) -> Result<(), BuildError> {
        self.term()?;
        loop {
            let op = match self.cursor.peek().map(|lexeme| &lexeme.token) {
                Some(Token::Plus) => ArithmeticOp::Add,
                Some(Token::Minus) => ArithmeticOp::Sub,
                _ => return Ok(()),
            };
            let token = self.next("an arithmetic operator")?;
            self.term()?;
            self.reduce(Production::Arithmetic(op), vec![token])?;
        }
    }

    pub(crate) fn end(&self) -> Result<(), BuildError> {
        match self.cursor.peek() {
            Some(lexeme) => Err(self.syntax("end of statement", lexeme)),
            None => Ok(()),
        }
    }

    fn reduce(&mut self, production: Production, tokens: Vec<SourceToken>) -> Result<(), BuildError> {
        self.reducer.reduce(production, &tokens)
    }

    fn syntax(&self, expected: &str, lexeme: &Lexeme) -> BuildError {
        CompileError::syntax(expected, lexeme.source.clone(), self.statement).into()
    }

    fn unexpected_end(&self, expected: &str) -> BuildError {
        CompileError::unexpected_end(expected, self.cursor.end(), self.statement).into()
    }

    fn unexpected(&self, expected: &str) -> BuildError {
        match self.cursor.peek() {
            Some(lexeme) => self.syntax(expected, lexeme),
            None => self.unexpected_end(expected),
        }
    }

    /// Token of the lexeme the cursor is at, without consuming it
    fn here(&self, expected: &str) -> Result<SourceToken, BuildError> {
        match self.cursor.peek() {
            Some(lexeme) => Ok(lexeme.source.clone()),
            None => Err(self.unexpected_end(expected)),
        }
    }

    fn next(&mut self, expected: &str) -> Result<SourceToken, BuildError> {
        match self.cursor.advance() {
            Some(lexeme) => Ok(lexeme.source.clone()),
            None => Err(self.unexpected_end(expected)),
        }
    }

    fn expect(&mut self, token: Token, expected: &str) -> Result<SourceToken, BuildError> {
        match self.cursor.eat(&token) {
            Some(source) => Ok(source),
            None => Err(self.unexpected(expected)),
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<SourceToken, BuildError> {
        match self.cursor.eat_keyword(keyword) {
            Some(source) => Ok(source),
            None => Err(self.unexpected(keyword)),
        }
    }

    /// Runs `parse` one nesting level deeper; `token` opens the level
    fn nested<F>(&mut self, token: &SourceToken, parse: F) -> Result<(), BuildError>
    where
        F: FnOnce(&mut Self) -> Result<(), BuildError>,
    {
        if self.depth >= MAX_NESTING {
            return Err(CompileError::nesting_too_deep(MAX_NESTING, token.clone(), self.statement).into());
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn followed_by_parenthesis(&self) -> bool {
        matches!(self.cursor.peek_at(1).map(|lexeme| &lexeme.token), Some(Token::LParen))
    }

    fn disjunction(&mut self) -> Result<(), BuildError> {
        self.conjunction()?;
        while let Some(or) = self.cursor.eat_keyword("OR") {
            self.conjunction()?;
            self.reduce(Production::Or, vec![or])?;
        }
        Ok(())
    }

    fn conjunction(&mut self) -> Result<(), BuildError> {
        self.negation()?;
        while let Some(and) = self.cursor.eat_keyword("AND") {
            self.negation()?;
            self.reduce(Production::And, vec![and])?;
        }
        Ok(())
    }

    fn negation(&mut self) -> Result<(), BuildError> {
        match self.cursor.eat_keyword("NOT") {
            Some(not) => {
                self.nested(&not, Self::negation)?;
                self.reduce(Production::Not, vec![not])
            }
            None => self.primary(),
        }
    }

    /// An opening parenthesis here always starts a grouped filter
    fn primary(&mut self) -> Result<(), BuildError> {
        if let Some(open) = self.cursor.eat(&Token::LParen) {
            self.nested(&open, Self::disjunction)?;
            return self.expect(Token::RParen, "')'").map(drop);
        }
        if self.dialect == Dialect::Ecql {
            if let Some(open) = self.cursor.eat(&Token::LBracket) {
                self.nested(&open, Self::disjunction)?;
                return self.expect(Token::RBracket, "']'").map(drop);
            }
        }
        let keyword = match self.cursor.peek() {
            Some(lexeme) => lexeme.keyword(),
            None => return Err(self.unexpected_end("a predicate")),
        };
        let routine = self.followed_by_parenthesis();
        if let Some(op) = keyword.as_deref().and_then(SpatialOperator::from_routine) {
            if routine {
                return self.spatial(op);
            }
        }
        match keyword.as_deref() {
            Some("INCLUDE") => {
                let include = self.next("INCLUDE")?;
                self.reduce(Production::Include, vec![include])
            }
            Some("EXCLUDE") => {
                let exclude = self.next("EXCLUDE")?;
                self.reduce(Production::Exclude, vec![exclude])
            }
            Some("ID") if routine => self.feature_ids(),
            Some("IN") if routine && self.dialect == Dialect::Ecql => self.feature_ids(),
            Some("BBOX") if routine => self.bbox(),
            Some("DWITHIN") if routine => self.distance(DistanceOperator::DWithin),
            Some("BEYOND") if routine => self.distance(DistanceOperator::Beyond),
            Some("RELATE") if routine => self.relate(),
            _ => self.value_predicate(),
        }
    }

    fn feature_ids(&mut self) -> Result<(), BuildError> {
        let keyword = self.next("ID")?;
        self.expect(Token::LParen, "'('")?;
        loop {
            let id = match self.cursor.advance() {
                Some(Lexeme {
                    token: Token::SingleQuotedString(_),
                    source,
                })
                | Some(Lexeme {
                    token: Token::Number(_, _),
                    source,
                })
                | Some(Lexeme {
                    token: Token::Word(_),
                    source,
                }) => source.clone(),
                Some(other) => return Err(self.syntax("a feature id", other)),
                None => return Err(self.unexpected_end("a feature id")),
            };
            self.reduce(Production::FeatureId, vec![id])?;
            if self.cursor.eat(&Token::Comma).is_none() {
                break;
            }
        }
        self.expect(Token::RParen, "')'")?;
        self.reduce(Production::FeatureIdPredicate, vec![keyword])
    }

    fn spatial(&mut self, op: SpatialOperator) -> Result<(), BuildError> {
        let keyword = self.next("a spatial operator")?;
        self.expect(Token::LParen, "'('")?;
        self.operand()?;
        self.expect(Token::Comma, "','")?;
        self.geometry_operand()?;
        self.expect(Token::RParen, "')'")?;
        self.reduce(Production::Spatial(op), vec![keyword])
    }

    fn bbox(&mut self) -> Result<(), BuildError> {
        let keyword = self.next("BBOX")?;
        self.expect(Token::LParen, "'('")?;
        self.operand()?;
        for _ in 0..BBOX_BOUNDS {
            self.expect(Token::Comma, "','")?;
            self.signed_literal()?;
        }
        let mut tokens = vec![keyword];
        if self.cursor.eat(&Token::Comma).is_some() {
            tokens.push(self.reference_system()?);
        }
        self.expect(Token::RParen, "')'")?;
        self.reduce(Production::BBox, tokens)
    }

    fn distance(&mut self, op: DistanceOperator) -> Result<(), BuildError> {
        let keyword = self.next("a distance operator")?;
        self.expect(Token::LParen, "'('")?;
        self.operand()?;
        self.expect(Token::Comma, "','")?;
        self.geometry_operand()?;
        self.expect(Token::Comma, "','")?;
        self.signed_literal()?;
        self.expect(Token::Comma, "','")?;
        let mut tokens = vec![keyword];
        while let Some(Lexeme {
            token: Token::Word(_),
            source,
        }) = self.cursor.peek()
        {
            tokens.push(source.clone());
            self.cursor.advance();
        }
        if tokens.len() == 1 {
            return Err(self.unexpected("distance units"));
        }
        self.expect(Token::RParen, "')'")?;
        self.reduce(Production::Distance(op), tokens)
    }

    fn relate(&mut self) -> Result<(), BuildError> {
        let keyword = self.next("RELATE")?;
        self.expect(Token::LParen, "'('")?;
        self.operand()?;
        self.expect(Token::Comma, "','")?;
        self.geometry_operand()?;
        if self.cursor.eat(&Token::Comma).is_some() {
            let pattern = self.de9im_pattern()?;
            self.reduce(Production::StringLiteral, vec![pattern.clone()])?;
            self.reduce(Production::De9imPattern, vec![pattern])?;
            self.expect(Token::RParen, "')'")?;
            self.reduce(Production::RelatePattern, vec![keyword])
        } else {
            self.expect(Token::RParen, "')'")?;
            self.reduce(Production::Relate, vec![keyword])
        }
    }

    /// Quoted, double quoted or written out as bare characters up to the closing parenthesis
    fn de9im_pattern(&mut self) -> Result<SourceToken, BuildError> {
        match self.cursor.peek() {
            Some(Lexeme {
                token: Token::SingleQuotedString(_),
                source,
            })
            | Some(Lexeme {
                token: Token::DoubleQuotedString(_),
                source,
            }) => {
                self.cursor.advance();
                return Ok(source.clone());
            }
            Some(Lexeme {
                token: Token::Word(word),
                source,
            }) if word.quote_style.is_some() => {
                self.cursor.advance();
                return Ok(source.clone());
            }
            _ => {}
        }
        let start = self.here("a DE-9IM pattern")?;
        let mut pattern = String::new();
        let mut previous: Option<&SourceToken> = None;
        while let Some(lexeme) = self.cursor.peek() {
            if lexeme.token == Token::Comma || lexeme.token == Token::RParen {
                break;
            }
            if let Some(previous) = previous {
                let adjacent = previous.line() == lexeme.source.line()
                    && previous.column() + previous.text().chars().count() as u64 == lexeme.source.column();
                if !adjacent {
                    return Err(self.syntax("a DE-9IM pattern without spaces", lexeme));
                }
            }
            pattern.push_str(&lexeme.token.to_string());
            previous = Some(&lexeme.source);
            self.cursor.advance();
        }
        if pattern.is_empty() {
            return Err(self.unexpected("a DE-9IM pattern"));
        }
        Ok(SourceToken::new(pattern, start.line(), start.column()))
    }

    /// Left operand of a predicate: an attribute in the base dialect, any expression in the extended one
    fn operand(&mut self) -> Result<(), BuildError> {
        match self.dialect {
            Dialect::Cql => self.attribute(),
            Dialect::Ecql => self.expression(),
        }
    }

    fn geometry_operand(&mut self) -> Result<(), BuildError> {
        if self.dialect == Dialect::Ecql {
            return self.expression();
        }
        let keyword = match self.cursor.peek() {
            Some(lexeme) => lexeme.keyword(),
            None => return Err(self.unexpected_end("a geometry literal")),
        };
        match keyword.as_deref() {
            Some("SRID") => self.srid_literal(),
            Some("ENVELOPE") => self.envelope(),
            Some(keyword) if is_geometry_keyword(keyword) => self.geometry_literal(),
            _ => Err(self.unexpected("a geometry literal")),
        }
    }

    fn value_predicate(&mut self) -> Result<(), BuildError> {
        self.operand()?;
        let lexeme = match self.cursor.peek() {
            Some(lexeme) => lexeme,
            None => return Err(self.unexpected_end("a comparison operator")),
        };
        if let Some(op) = self.comparison_operator(lexeme) {
            let token = self.next("a comparison operator")?;
            self.expression()?;
            return self.reduce(Production::Comparison(op), vec![token]);
        }
        let keyword = lexeme.keyword();
        match keyword.as_deref() {
            Some("NOT") => {
                let not = self.next("NOT")?;
                let negated = match self.cursor.peek() {
                    Some(lexeme) => lexeme.keyword(),
                    None => return Err(self.unexpected_end("IN, LIKE, ILIKE or BETWEEN")),
                };
                match negated.as_deref() {
                    Some("IN") => {
                        self.cursor.advance();
                        self.in_list(Production::NotInPredicate, not)
                    }
                    Some("LIKE") => {
                        self.cursor.advance();
                        self.like(Production::NotLike, not)
                    }
                    Some("ILIKE") => {
                        self.cursor.advance();
                        self.like(Production::NotILike, not)
                    }
                    Some("BETWEEN") => {
                        self.cursor.advance();
                        self.between(Production::NotBetween, not)
                    }
                    _ => Err(self.unexpected("IN, LIKE, ILIKE or BETWEEN")),
                }
            }
            Some("IN") => {
                let token = self.next("IN")?;
                self.in_list(Production::InPredicate, token)
            }
            Some("LIKE") => {
                let token = self.next("LIKE")?;
                self.like(Production::Like, token)
            }
            Some("ILIKE") => {
                let token = self.next("ILIKE")?;
                self.like(Production::ILike, token)
            }
            Some("BETWEEN") => {
                let token = self.next("BETWEEN")?;
                self.between(Production::Between, token)
            }
            Some("IS") => {
                let token = self.next("IS")?;
                let production = if self.cursor.eat_keyword("NOT").is_some() {
                    Production::IsNotNull
                } else {
                    Production::IsNull
                };
                self.expect_keyword("NULL")?;
                self.reduce(production, vec![token])
            }
            _ => Err(self.syntax("a comparison operator", lexeme)),
        }
    }

    fn comparison_operator(&self, lexeme: &Lexeme) -> Option<ComparisonOp> {
        match &lexeme.token {
            Token::Eq => Some(ComparisonOp::Eq),
            Token::Neq => Some(ComparisonOp::NotEq),
            Token::Lt => Some(ComparisonOp::Lt),
            Token::LtEq => Some(ComparisonOp::LtEq),
            Token::Gt => Some(ComparisonOp::Gt),
            Token::GtEq => Some(ComparisonOp::GtEq),
            _ if self.dialect == Dialect::Ecql => match lexeme.keyword().as_deref() {
                Some("EQ") => Some(ComparisonOp::Eq),
                Some("NEQ") => Some(ComparisonOp::NotEq),
                Some("LT") => Some(ComparisonOp::Lt),
                Some("LTE") => Some(ComparisonOp::LtEq),
                Some("GT") => Some(ComparisonOp::Gt),
                Some("GTE") => Some(ComparisonOp::GtEq),
                _ => None,
            },
            _ => None,
        }
    }

    fn in_list(&mut self, production: Production, token: SourceToken) -> Result<(), BuildError> {
        self.expect(Token::LParen, "'('")?;
        loop {
            let member = self.here("an expression")?;
            self.expression()?;
            self.reduce(Production::InListMember, vec![member])?;
            if self.cursor.eat(&Token::Comma).is_none() {
                break;
            }
        }
        self.expect(Token::RParen, "')'")?;
        self.reduce(production, vec![token])
    }

    fn like(&mut self, production: Production, token: SourceToken) -> Result<(), BuildError> {
        match self.cursor.peek() {
            Some(Lexeme {
                token: Token::SingleQuotedString(_),
                source,
            }) => {
                let pattern = source.clone();
                self.cursor.advance();
                self.reduce(Production::StringLiteral, vec![pattern])?;
                self.reduce(production, vec![token])
            }
            _ => Err(self.unexpected("a quoted pattern")),
        }
    }

    fn between(&mut self, production: Production, token: SourceToken) -> Result<(), BuildError> {
        self.expression()?;
        self.expect_keyword("AND")?;
        self.expression()?;
        self.reduce(production, vec![token])
    }

    fn term(&mut self) -> Result<(), BuildError> {
        self.factor()?;
        loop {
            let op = match self.cursor.peek().map(|lexeme| &lexeme.token) {
                Some(Token::Mul) => ArithmeticOp::Mul,
                Some(Token::Div) => ArithmeticOp::Div,
                _ => return Ok(()),
            };
            let token = self.next("an arithmetic operator")?;
            self.factor()?;
            self.reduce(Production::Arithmetic(op), vec![token])?;
        }
    }

    fn factor(&mut self) -> Result<(), BuildError> {
        let lexeme = match self.cursor.peek() {
            Some(lexeme) => lexeme,
            None => return Err(self.unexpected_end("an expression")),
        };
        match &lexeme.token {
            Token::Minus | Token::Number(_, _) => self.signed_literal().map(drop),
            Token::LParen => {
                self.cursor.advance();
                self.nested(&lexeme.source, Self::expression)?;
                self.expect(Token::RParen, "')'").map(drop)
            }
            Token::SingleQuotedString(_) => {
                self.cursor.advance();
                self.reduce(Production::StringLiteral, vec![lexeme.source.clone()])
            }
            Token::Word(_) => {
                let routine = self.followed_by_parenthesis();
                match lexeme.keyword().as_deref() {
                    Some("TRUE") | Some("FALSE") => {
                        self.cursor.advance();
                        self.reduce(Production::BooleanLiteral, vec![lexeme.source.clone()])
                    }
                    Some("SRID")
                        if matches!(self.cursor.peek_at(1).map(|lexeme| &lexeme.token), Some(Token::Eq)) =>
                    {
                        self.srid_literal()
                    }
                    Some("ENVELOPE") if routine => self.envelope(),
                    Some(keyword) if routine && is_geometry_keyword(keyword) => self.geometry_literal(),
                    _ if routine => self.function(),
                    _ => self.attribute(),
                }
            }
            _ => Err(self.syntax("an expression", lexeme)),
        }
    }

    fn function(&mut self) -> Result<(), BuildError> {
        let name = self.next("a function name")?;
        self.expect(Token::LParen, "'('")?;
        self.reduce(Production::FunctionName, vec![name.clone()])?;
        if self.cursor.eat(&Token::RParen).is_none() {
            loop {
                let argument = self.here("an expression")?;
                self.nested(&argument, Self::expression)?;
                self.reduce(Production::FunctionArgument, vec![argument])?;
                if self.cursor.eat(&Token::Comma).is_none() {
                    break;
                }
            }
            self.expect(Token::RParen, "')'")?;
        }
        self.reduce(Production::Function, vec![name])
    }

    /// `a`, `a.b.c` or `ns:name`
    fn attribute(&mut self) -> Result<(), BuildError> {
        let mut segments = match self.cursor.peek() {
            Some(Lexeme {
                token: Token::Word(_),
                source,
            }) => {
                self.cursor.advance();
                vec![source.clone()]
            }
            _ => return Err(self.unexpected("an attribute")),
        };
        loop {
            let separator = self.cursor.peek().map(|lexeme| lexeme.token.clone());
            let segment = match self.cursor.peek_at(1) {
                Some(Lexeme {
                    token: Token::Word(_),
                    source,
                }) => source.clone(),
                _ => break,
            };
            match separator {
                Some(Token::Period) => segments.push(segment),
                Some(Token::Colon) => match segments.pop() {
                    Some(prefix) => segments.push(SourceToken::new(
                        format!("{}:{}", prefix.text(), segment.text()),
                        prefix.line(),
                        prefix.column(),
                    )),
                    None => break,
                },
                _ => break,
            }
            self.cursor.advance();
            self.cursor.advance();
        }
        self.reduce(Production::PropertyName, segments)
    }

    fn signed(&mut self) -> Result<(Option<SourceToken>, SourceToken), BuildError> {
        let minus = self.cursor.eat(&Token::Minus);
        match self.cursor.peek() {
            Some(Lexeme {
                token: Token::Number(_, _),
                source,
            }) => {
                self.cursor.advance();
                Ok((minus, source.clone()))
            }
            _ => Err(self.unexpected("a number")),
        }
    }

    fn negate(&mut self, minus: Option<SourceToken>, number: SourceToken) -> Result<SourceToken, BuildError> {
        match minus {
            Some(minus) => {
                self.reduce(Production::NegativeNumber, vec![minus.clone()])?;
                Ok(signed_token(&minus, &number))
            }
            None => Ok(number),
        }
    }

    fn signed_number(&mut self, production: Production) -> Result<SourceToken, BuildError> {
        let (minus, number) = self.signed()?;
        self.reduce(production, vec![number.clone()])?;
        self.negate(minus, number)
    }

    fn signed_literal(&mut self) -> Result<SourceToken, BuildError> {
        let (minus, number) = self.signed()?;
        let production = if number.text().contains(|c: char| c == '.' || c == 'e' || c == 'E') {
            Production::FloatingLiteral
        } else {
            Production::IntegerLiteral
        };
        self.reduce(production, vec![number.clone()])?;
        self.negate(minus, number)
    }

    fn reference_system(&mut self) -> Result<SourceToken, BuildError> {
        match self.cursor.peek() {
            Some(Lexeme {
                token: Token::SingleQuotedString(_),
                source,
            })
            | Some(Lexeme {
                token: Token::Number(_, _),
                source,
            }) => {
                self.cursor.advance();
                Ok(source.clone())
            }
            _ => Err(self.unexpected("a reference system code")),
        }
    }

    /// `SRID=n;` followed by a geometry
    fn srid_literal(&mut self) -> Result<(), BuildError> {
        let keyword = self.next("SRID")?;
        self.expect(Token::Eq, "'='")?;
        match self.dialect {
            Dialect::Cql => {
                self.signed_number(Production::Srid)?;
                self.expect(Token::SemiColon, "';'")?;
                self.geometry_literal()?;
                self.reduce(Production::SridGeometryLiteral, vec![keyword])
            }
            Dialect::Ecql => {
                let (minus, number) = self.signed()?;
                let srid = match minus {
                    Some(minus) => signed_token(&minus, &number),
                    None => number,
                };
                self.expect(Token::SemiColon, "';'")?;
                self.geometry_literal()?;
                self.reduce(Production::GeometryLiteralWithSrid, vec![keyword, srid])
            }
        }
    }

    /// `ENVELOPE(minx, maxx, maxy, miny [, srs])`
    fn envelope(&mut self) -> Result<(), BuildError> {
        let keyword = self.next("ENVELOPE")?;
        self.expect(Token::LParen, "'('")?;
        let mut tokens = vec![keyword];
        for component in 0..ENVELOPE_COMPONENTS {
            if component > 0 {
                self.expect(Token::Comma, "','")?;
            }
            let bound = match self.dialect {
                Dialect::Cql => self.signed_number(Production::EnvelopeComponent)?,
                Dialect::Ecql => {
                    let (minus, number) = self.signed()?;
                    match minus {
                        Some(minus) => signed_token(&minus, &number),
                        None => number,
                    }
                }
            };
            tokens.push(bound);
        }
        if self.cursor.eat(&Token::Comma).is_some() {
            tokens.push(self.reference_system()?);
        }
        self.expect(Token::RParen, "')'")?;
        self.reduce(Production::Envelope, tokens)
    }

    fn geometry_literal(&mut self) -> Result<(), BuildError> {
        let keyword = self.here("a geometry")?;
        self.geometry_text(GeometryRole::Root)?;
        self.reduce(Production::GeometryLiteral, vec![keyword])
    }

    fn geometry_text(&mut self, role: GeometryRole) -> Result<(), BuildError> {
        let keyword = match self.cursor.peek().and_then(Lexeme::keyword) {
            Some(keyword) if is_geometry_keyword(&keyword) => keyword,
            _ => return Err(self.unexpected("a geometry type")),
        };
        let token = self.next("a geometry type")?;
        match keyword.as_str() {
            "POINT" => {
                self.expect(Token::LParen, "'('")?;
                self.coordinate()?;
                self.expect(Token::RParen, "')'")?;
                self.reduce(Production::PointText(role), vec![token])
            }
            "LINESTRING" => self.line_body(role, token),
            "POLYGON" => self.polygon_body(role, token),
            "MULTIPOINT" => {
                self.expect(Token::LParen, "'('")?;
                loop {
                    let member = self.here("a point")?;
                    if self.cursor.eat(&Token::LParen).is_some() {
                        self.coordinate()?;
                        self.expect(Token::RParen, "')'")?;
                    } else {
                        self.coordinate()?;
                    }
                    self.reduce(Production::PointText(GeometryRole::MultiPointMember), vec![member])?;
                    if self.cursor.eat(&Token::Comma).is_none() {
                        break;
                    }
                }
                self.expect(Token::RParen, "')'")?;
                self.reduce(Production::MultiPointText(role), vec![token])
            }
            "MULTILINESTRING" => {
                self.expect(Token::LParen, "'('")?;
                loop {
                    let member = self.here("a line")?;
                    self.line_body(GeometryRole::MultiLineStringMember, member)?;
                    if self.cursor.eat(&Token::Comma).is_none() {
                        break;
                    }
                }
                self.expect(Token::RParen, "')'")?;
                self.reduce(Production::MultiLineStringText(role), vec![token])
            }
            "MULTIPOLYGON" => {
                self.expect(Token::LParen, "'('")?;
                loop {
                    let member = self.here("a polygon")?;
                    self.polygon_body(GeometryRole::MultiPolygonMember, member)?;
                    if self.cursor.eat(&Token::Comma).is_none() {
                        break;
                    }
                }
                self.expect(Token::RParen, "')'")?;
                self.reduce(Production::MultiPolygonText(role), vec![token])
            }
            _ => {
                self.reduce(Production::GeometryCollectionStart, vec![token.clone()])?;
                self.expect(Token::LParen, "'('")?;
                loop {
                    self.nested(&token, |grammar| grammar.geometry_text(GeometryRole::CollectionMember))?;
                    if self.cursor.eat(&Token::Comma).is_none() {
                        break;
                    }
                }
                self.expect(Token::RParen, "')'")?;
                self.reduce(Production::GeometryCollectionText(role), vec![token])
            }
        }
    }

    fn line_body(&mut self, role: GeometryRole, token: SourceToken) -> Result<(), BuildError> {
        self.expect(Token::LParen, "'('")?;
        loop {
            self.coordinate()?;
            if self.cursor.eat(&Token::Comma).is_none() {
                break;
            }
        }
        self.expect(Token::RParen, "')'")?;
        self.reduce(Production::LineStringText(role), vec![token])
    }

    fn polygon_body(&mut self, role: GeometryRole, token: SourceToken) -> Result<(), BuildError> {
        self.expect(Token::LParen, "'('")?;
        loop {
            let ring = self.here("a ring")?;
            self.line_body(GeometryRole::Ring, ring)?;
            if self.cursor.eat(&Token::Comma).is_none() {
                break;
            }
        }
        self.expect(Token::RParen, "')'")?;
        self.reduce(Production::PolygonText(role), vec![token])
    }

    fn coordinate(&mut self) -> Result<(), BuildError> {
        let x = self.signed_number(Production::Ordinate)?;
        self.signed_number(Production::Ordinate)?;
        self.reduce(Production::Coordinate, vec![x])
    }
}

fn is_geometry_keyword(keyword: &str) -> bool {
    matches!(
        keyword,
        "POINT" | "LINESTRING" | "POLYGON" | "MULTIPOINT" | "MULTILINESTRING" | "MULTIPOLYGON" | "GEOMETRYCOLLECTION"
    )
}

fn signed_token(minus: &SourceToken, number: &SourceToken) -> SourceToken {
    SourceToken::new(format!("-{}", number.text()), minus.line(), minus.column())
}
