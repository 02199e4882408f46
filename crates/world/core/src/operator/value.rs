//! Resolution of rule operands and comparison of resolved values.
//!
//! Every value is a string; numeric comparators and arithmetic coerce on
//! demand. A side that cannot be resolved is `None`, and any comparison
//! involving `None` fails.

use crate::env::CharacterOracle;
use crate::grid;
use crate::state::{
    APPEARANCE_VARIABLE, Actor, ActorId, Character, Comparator, Globals, LocalId, Operation,
    Position, RuleCondition, RuleValue, Stage, TRANSFORM_VARIABLE,
};

use super::Bindings;

/// How template ids map to stage actors while resolving a value.
#[derive(Clone, Copy, Debug)]
pub enum Scope<'b> {
    /// Every template id names the walked actor (preconditions, loop counts).
    Actor(ActorId),
    /// Template ids resolve through the bindings of a match.
    Bindings(&'b Bindings),
}

impl Scope<'_> {
    pub fn actor_id(&self, local: LocalId) -> Option<ActorId> {
        match self {
            Self::Actor(id) => Some(*id),
            Self::Bindings(bindings) => bindings.get(local),
        }
    }
}

/// Read-only view of the working grid, used by matching and resolution.
#[derive(Clone, Copy)]
pub struct ScenarioView<'v> {
    pub stage: &'v Stage,
    pub globals: &'v Globals,
    pub characters: &'v dyn CharacterOracle,
}

impl<'v> ScenarioView<'v> {
    pub fn new(stage: &'v Stage, globals: &'v Globals, characters: &'v dyn CharacterOracle) -> Self {
        Self {
            stage,
            globals,
            characters,
        }
    }

    pub fn actor(&self, id: ActorId) -> Option<&'v Actor> {
        self.stage.actor(id)
    }

    pub fn character(&self, id: &str) -> Option<&'v Character> {
        self.characters.character(id)
    }

    /// Stage actors whose wrapped footprint covers `cell`, in id order.
    pub fn occupants(&self, cell: Position) -> Vec<&'v Actor> {
        self.stage
            .actors
            .values()
            .map(AsRef::as_ref)
            .filter(|actor| {
                grid::footprint(actor, self.character(&actor.character_id))
                    .into_iter()
                    .filter_map(|covered| self.stage.wrap(covered))
                    .any(|covered| covered == cell)
            })
            .collect()
    }
}

/// Resolves an operand to its current string value.
///
/// The comparator matters for `appearance`: equality comparators see the
/// appearance id, every other comparator sees its display name.
pub fn resolve(
    value: &RuleValue,
    comparator: Comparator,
    scope: Scope<'_>,
    view: &ScenarioView<'_>,
) -> Option<String> {
    match value {
        RuleValue::Constant(constant) => Some(constant.clone()),
        RuleValue::Global(id) => view.globals.value(id).map(str::to_owned),
        RuleValue::Actor { actor_id, variable } => {
            let actor = view.actor(scope.actor_id(*actor_id)?)?;
            actor_variable(actor, variable, comparator, view)
        }
    }
}

fn actor_variable(
    actor: &Actor,
    variable: &str,
    comparator: Comparator,
    view: &ScenarioView<'_>,
) -> Option<String> {
    let character = view.character(&actor.character_id);
    match variable {
        APPEARANCE_VARIABLE if comparator.is_equality() => Some(actor.appearance.clone()),
        APPEARANCE_VARIABLE => {
            let name = character
                .and_then(|character| character.spritesheet.appearance(&actor.appearance))
                .map(|info| info.name.as_str())
                .filter(|name| !name.is_empty())
                .unwrap_or(actor.appearance.as_str());
            Some(name.to_owned())
        }
        TRANSFORM_VARIABLE => actor.transform.map(|transform| transform.to_string()),
        name => actor
            .variable_values
            .get(name)
            .cloned()
            .or_else(|| character?.default_value(name).map(str::to_owned)),
    }
}

/// Applies `comparator` to two resolved values.
pub fn compare(left: Option<&str>, comparator: Comparator, right: Option<&str>) -> bool {
    let (Some(left), Some(right)) = (left, right) else {
        return false;
    };
    match comparator {
        Comparator::Equal => left == right,
        Comparator::NotEqual => left != right,
        Comparator::GreaterOrEqual => numeric(left, right, |a, b| a >= b),
        Comparator::LessOrEqual => numeric(left, right, |a, b| a <= b),
        Comparator::Greater => numeric(left, right, |a, b| a > b),
        Comparator::Less => numeric(left, right, |a, b| a < b),
        // a comma-separated left side (e.g. several pressed keys) is a set
        Comparator::Contains if left.contains(',') => left.split(',').any(|token| token == right),
        Comparator::Contains => left.contains(right),
        Comparator::StartsWith => left.starts_with(right),
        Comparator::EndsWith => left.ends_with(right),
    }
}

fn numeric(left: &str, right: &str, op: impl Fn(f64, f64) -> bool) -> bool {
    match (parse_number(left), parse_number(right)) {
        (Some(left), Some(right)) => op(left, right),
        _ => false,
    }
}

/// Evaluates one condition; disabled conditions always hold.
pub fn evaluate_condition(
    condition: &RuleCondition,
    scope: Scope<'_>,
    view: &ScenarioView<'_>,
) -> bool {
    if !condition.enabled {
        return true;
    }
    let left = resolve(&condition.left, condition.comparator, scope, view);
    let right = resolve(&condition.right, condition.comparator, scope, view);
    compare(left.as_deref(), condition.comparator, right.as_deref())
}

pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// Prints integral values without a fractional part.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Combines a current value with an operand.
///
/// A missing current value counts as zero for arithmetic; `None` means a
/// side was not numeric and the update must be skipped.
pub fn apply_operation(current: Option<&str>, operation: Operation, operand: &str) -> Option<String> {
    match operation {
        Operation::Set => Some(operand.to_owned()),
        Operation::Add | Operation::Subtract => {
            let current = parse_number(current.unwrap_or("0"))?;
            let operand = parse_number(operand)?;
            let result = match operation {
                Operation::Subtract => current - operand,
                _ => current + operand,
            };
            Some(format_number(result))
        }
    }
}
