//! Source lines, compiled statements and whole programs

mod line;
mod statement;

pub use line::Line;
pub use statement::Statement;

use std::fmt;

/// Ordered compiled output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    statements: Vec<Statement>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn extend(&mut self, statements: impl IntoIterator<Item = Statement>) {
        self.statements.extend(statements);
    }

    pub fn insert(&mut self, index: usize, statement: Statement) {
        self.statements.insert(index, statement);
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Statement> {
        self.statements.iter_mut()
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Keep only statements matching the predicate
    pub fn retain(&mut self, keep: impl FnMut(&Statement) -> bool) {
        self.statements.retain(keep);
    }

    /// Emitted text, one entry per statement
    pub fn lines(&self) -> Vec<String> {
        self.statements.iter().map(|s| s.text.clone()).collect()
    }

    pub fn into_statements(self) -> Vec<Statement> {
        self.statements
    }
}

impl From<Vec<Statement>> for Program {
    fn from(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

impl FromIterator<Statement> for Program {
    fn from_iter<I: IntoIterator<Item = Statement>>(iter: I) -> Self {
        Self {
            statements: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Program {
    type Item = Statement;
    type IntoIter = std::vec::IntoIter<Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.into_iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, statement) in self.statements.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&statement.text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_lines_and_display() {
        let line = Line::new("print 1", 1, "main.mlogx");
        let program: Program = vec![
            Statement::new("print 1", "print 1", line.clone()),
            Statement::new("end", "end", line),
        ]
        .into();
        assert_eq!(program.len(), 2);
        assert_eq!(program.lines(), vec!["print 1", "end"]);
        assert_eq!(program.to_string(), "print 1\nend");
        assert_eq!(program.statements()[0].original_text(), "print 1");
    }
}
