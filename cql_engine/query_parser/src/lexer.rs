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

use diagnostics::{CompileError, SourceToken};
use sqlparser::{
    dialect::GenericDialect,
    tokenizer::{Token, Tokenizer},
};

#[derive(Debug, PartialEq, Clone)]
pub(crate) struct Lexeme {
    pub(crate) token: Token,
    pub(crate) source: SourceToken,
}

impl Lexeme {
    /// Upper-cased value of an unquoted word
    pub(crate) fn keyword(&self) -> Option<String> {
        match &self.token {
            Token::Word(word) if word.quote_style.is_none() => Some(word.value.to_uppercase()),
            _ => None,
        }
    }

    pub(crate) fn is_keyword(&self, keyword: &str) -> bool {
        match &self.token {
            Token::Word(word) => word.quote_style.is_none() && word.value.eq_ignore_ascii_case(keyword),
            _ => false,
        }
    }
}

/// Splits the statement into lexemes; whitespace and comments are dropped
pub(crate) fn scan(statement: &str) -> Result<Vec<Lexeme>, CompileError> {
    let dialect = GenericDialect {};
    let tokens = match Tokenizer::new(&dialect, statement).tokenize_with_location() {
        Ok(tokens) => tokens,
        Err(error) => {
            log::debug!("{:?} can't be scanned. Error: {}", statement, error);
            return Err(CompileError::lexical(
                error.to_string(),
                SourceToken::synthetic(statement),
                statement,
            ));
        }
    };
    Ok(tokens
        .into_iter()
        .filter(|located| !matches!(located.token, Token::Whitespace(_) | Token::EOF))
        .map(|located| Lexeme {
            source: SourceToken::new(text_of(&located.token), located.location.line, located.location.column),
            token: located.token,
        })
        .collect())
}

fn text_of(token: &Token) -> String {
    match token {
        Token::Word(word) => word.value.clone(),
        Token::Number(number, _) => number.clone(),
        Token::SingleQuotedString(value) | Token::DoubleQuotedString(value) => value.clone(),
        other => other.to_string(),
    }
}

/// Position in the scanned statement
#[derive(Debug)]
pub(crate) struct Cursor<'a> {
    lexemes: &'a [Lexeme],
    position: usize,
    end: SourceToken,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(lexemes: &'a [Lexeme], statement: &str) -> Cursor<'a> {
        let line = statement.lines().count().max(1);
        let column = statement.lines().last().map(|last| last.chars().count()).unwrap_or(0) + 1;
        Cursor {
            lexemes,
            position: 0,
            end: SourceToken::new("end of statement", line as u64, column as u64),
        }
    }

    pub(crate) fn peek(&self) -> Option<&'a Lexeme> {
        self.lexemes.get(self.position)
    }

    pub(crate) fn peek_at(&self, offset: usize) -> Option<&'a Lexeme> {
        self.lexemes.get(self.position + offset)
    }

    pub(crate) fn advance(&mut self) -> Option<&'a Lexeme> {
        let lexeme = self.lexemes.get(self.position);
        if lexeme.is_some() {
            self.position += 1;
        }
        lexeme
    }

    pub(crate) fn eat(&mut self, token: &Token) -> Option<SourceToken> {
        match self.peek() {
            Some(lexeme) if &lexeme.token == token => {
                self.position += 1;
                Some(lexeme.source.clone())
            }
            _ => None,
        }
    }

    pub(crate) fn eat_keyword(&mut self, keyword: &str) -> Option<SourceToken> {
        match self.peek() {
            Some(lexeme) if lexeme.is_keyword(keyword) => {
                self.position += 1;
                Some(lexeme.source.clone())
            }
            _ => None,
        }
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.lexemes.len()
    }

    pub(crate) fn end(&self) -> SourceToken {
        self.end.clone()
    }
}
