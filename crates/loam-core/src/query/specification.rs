use serde::{Deserialize, Serialize};

use crate::{
    WHERE_WRAP_COLUMN,
    error::Error,
    join::FieldResolver,
    query::predicate::{Comparator, Logic, Predicate},
    sql::Dialect,
    value::Value,
};

///
/// Member
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Member {
    Predicate(Predicate),
    Group(Specification),
}

impl From<Predicate> for Member {
    fn from(p: Predicate) -> Self {
        Self::Predicate(p)
    }
}

impl From<Specification> for Member {
    fn from(s: Specification) -> Self {
        Self::Group(s)
    }
}

///
/// Specification
///
/// Ordered filter tree: predicates and nested sub-specifications, each
/// tagged with the connective joining it to the preceding member.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Specification {
    members: Vec<(Logic, Member)>,
}

impl Specification {
    #[must_use]
    pub const fn new() -> Self {
        Self { members: Vec::new() }
    }

    /// Append a predicate or sub-specification. Predicates carry their
    /// own connective; groups join with `and`.
    pub fn add(&mut self, member: impl Into<Member>) -> &mut Self {
        let member = member.into();
        let logic = match &member {
            Member::Predicate(p) => p.logic,
            Member::Group(_) => Logic::And,
        };

        self.members.push((logic, member));
        self
    }

    pub fn add_and(&mut self, member: impl Into<Member>) -> &mut Self {
        self.members.push((Logic::And, member.into()));
        self
    }

    pub fn add_or(&mut self, member: impl Into<Member>) -> &mut Self {
        self.members.push((Logic::Or, member.into()));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True iff any member reaches through a join.
    #[must_use]
    pub fn requires_join(&self) -> bool {
        self.members.iter().any(|(_, m)| match m {
            Member::Predicate(p) => p.requires_join(),
            Member::Group(g) => g.requires_join(),
        })
    }

    pub(crate) fn members(&self) -> impl Iterator<Item = &(Logic, Member)> {
        self.members.iter()
    }

    /// Render into a WHERE fragment. The first member's connective is
    /// stripped; long clause lists wrap onto continuation lines.
    pub(crate) fn render(
        &self,
        fields: &mut FieldResolver<'_>,
        dialect: Dialect,
    ) -> Result<String, Error> {
        let mut out = String::new();
        let mut line_len = 0usize;

        for (logic, member) in &self.members {
            let clause = match member {
                Member::Predicate(p) => render_predicate(p, fields, dialect)?,
                Member::Group(g) => {
                    if g.is_empty() {
                        continue;
                    }

                    format!("({})", g.render(fields, dialect)?)
                }
            };

            // the first rendered clause drops its leading connective
            if !out.is_empty() {
                if line_len + clause.len() > WHERE_WRAP_COLUMN {
                    out.push_str("\n    ");
                    line_len = 4;
                } else {
                    out.push(' ');
                    line_len += 1;
                }
                out.push_str(logic.sql());
                out.push(' ');
                line_len += logic.sql().len() + 1;
            }

            out.push_str(&clause);
            line_len += clause.len();
        }

        Ok(out)
    }
}

impl From<Predicate> for Specification {
    fn from(p: Predicate) -> Self {
        let mut spec = Self::new();
        spec.add(p);
        spec
    }
}

fn render_predicate(
    p: &Predicate,
    fields: &mut FieldResolver<'_>,
    dialect: Dialect,
) -> Result<String, Error> {
    let column = fields.resolve(&p.field)?;
    let rhs = match (&p.op, &p.value) {
        (Comparator::In | Comparator::NotIn, Value::List(items)) => {
            if items.is_empty() {
                "(null)".to_string()
            } else {
                let rendered: Vec<String> =
                    items.iter().map(|v| dialect.escape_value(v)).collect();

                format!("({})", rendered.join(", "))
            }
        }
        (_, value) => dialect.escape_value(value),
    };

    Ok(format!("{column} {} {rhs}", p.op.sql(p.value.is_null())))
}

#[cfg(test)]
mod tests;
