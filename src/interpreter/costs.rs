//! Battery cost model for actions

use super::types::{ActionKind, Value};
use serde::{Deserialize, Serialize};

/// Coefficients of the battery cost formula
///
/// `cost = duration * duration_factor + speed * speed_factor + term`, where
/// the term depends on the action kind. The defaults are the values the
/// language has always shipped with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModel {
    pub duration_factor: f32,
    pub speed_factor: f32,
    /// Per unit of euclidean distance when moving to a point
    pub move_to_point: f32,
    /// Per unit when moving by a scalar
    pub move_by: f32,
    pub turn: f32,
    pub ascend: f32,
    pub descend: f32,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            duration_factor: 0.1,
            speed_factor: 1.0,
            move_to_point: 0.7,
            move_by: 0.5,
            turn: 0.3,
            ascend: 0.6,
            descend: 0.2,
        }
    }
}

/// What an action will do to the flight state once paid for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    MoveTo { target: (f32, f32), distance: f32 },
    Turn,
    Altitude { delta: f32 },
}

/// Priced action, ready to commit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plan {
    pub cost: f32,
    pub effect: Effect,
}

impl CostModel {
    /// Price an action from its evaluated operands
    ///
    /// `data` has already been type checked, so it is a Point only for moves.
    pub fn plan(
        &self,
        kind: ActionKind,
        data: Value,
        speed: f32,
        duration: f32,
        position: (f32, f32),
    ) -> Option<Plan> {
        let base = duration * self.duration_factor + speed * self.speed_factor;

        let (term, effect) = match (kind, data) {
            (ActionKind::Move, Value::Point(x, y)) => {
                let distance = ((x - position.0).powi(2) + (y - position.1).powi(2)).sqrt();
                (
                    distance * self.move_to_point,
                    Effect::MoveTo {
                        target: (x, y),
                        distance,
                    },
                )
            }
            (ActionKind::Move, Value::Number(n)) => (
                (n * self.move_by).abs(),
                Effect::MoveTo {
                    target: (position.0 + n, position.1),
                    distance: n.abs(),
                },
            ),
            (ActionKind::Turn, Value::Number(angle)) => ((angle * self.turn).abs(), Effect::Turn),
            (ActionKind::AscendDescend, Value::Number(delta)) => {
                let term = if delta > 0.0 {
                    delta * self.ascend
                } else {
                    (delta * self.descend).abs()
                };
                (term, Effect::Altitude { delta })
            }
            _ => return None,
        };

        Some(Plan {
            cost: base + term,
            effect,
        })
    }
}
