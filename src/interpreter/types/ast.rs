//! Abstract Syntax Tree node types
//!
//! The tree is produced by an external parser and handed over either in
//! memory or as JSON. The constructor helpers below build the same shapes the
//! parser front end does (dock, turn left, descend to ground, ...).

use super::variables::Variable;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/* ===================== Expressions ===================== */

/// Expression AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expr {
    Number { v: f32 },
    VariableRef { var: Variable },
    Negate { inner: Box<Expr> },
    Add { left: Box<Expr>, right: Box<Expr> },
    Sub { left: Box<Expr>, right: Box<Expr> },
    Mul { left: Box<Expr>, right: Box<Expr> },
    RandomRange { lo: Box<Expr>, hi: Box<Expr> },
    PointConstruct { x: Box<Expr>, y: Box<Expr> },
}

impl Expr {
    pub fn number(v: f32) -> Self {
        Expr::Number { v }
    }

    pub fn zero() -> Self {
        Expr::Number { v: 0.0 }
    }

    pub fn var(var: Variable) -> Self {
        Expr::VariableRef { var }
    }

    pub fn negate(inner: Expr) -> Self {
        Expr::Negate {
            inner: Box::new(inner),
        }
    }

    pub fn add(left: Expr, right: Expr) -> Self {
        Expr::Add {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn sub(left: Expr, right: Expr) -> Self {
        Expr::Sub {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn mul(left: Expr, right: Expr) -> Self {
        Expr::Mul {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn random(lo: Expr, hi: Expr) -> Self {
        Expr::RandomRange {
            lo: Box::new(lo),
            hi: Box::new(hi),
        }
    }

    /// `random` without bounds samples the unit interval
    pub fn random_unit() -> Self {
        Expr::random(Expr::number(0.0), Expr::number(1.0))
    }

    pub fn point(x: Expr, y: Expr) -> Self {
        Expr::PointConstruct {
            x: Box::new(x),
            y: Box::new(y),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number { v } => write!(f, "{}", v),
            Expr::VariableRef { var } => write!(f, "<{}>", var),
            Expr::Negate { inner } => write!(f, "-{}", inner),
            Expr::Add { left, right } => write!(f, "({} + {})", left, right),
            Expr::Sub { left, right } => write!(f, "({} - {})", left, right),
            Expr::Mul { left, right } => write!(f, "({} * {})", left, right),
            Expr::RandomRange { lo, hi } => write!(f, "random [{}, {}]", lo, hi),
            Expr::PointConstruct { x, y } => write!(f, "point ({}, {})", x, y),
        }
    }
}

/* ===================== Statements ===================== */

/// Statement AST node
///
/// `Callback` only ever lives on the continuation stack; it is never part of a
/// parsed or serialized tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Stmt {
    Action(Action),
    Mode(Rc<Mode>),
    #[serde(skip)]
    Callback(Callback),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Move,
    Turn,
    AscendDescend,
}

/// A timed vehicle operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub data: Expr,
    #[serde(default = "Expr::zero")]
    pub speed: Expr,
    #[serde(default = "Expr::zero")]
    pub duration: Expr,
}

impl Action {
    pub fn new(kind: ActionKind, data: Expr) -> Self {
        Self {
            kind,
            data,
            speed: Expr::zero(),
            duration: Expr::zero(),
        }
    }

    /// Move by a scalar along x, or to a point
    pub fn move_by(data: Expr) -> Self {
        Self::new(ActionKind::Move, data)
    }

    /// Return to the initial position
    pub fn dock() -> Self {
        Self::new(ActionKind::Move, Expr::var(Variable::InitialPosition))
    }

    pub fn turn_right(angle: Expr) -> Self {
        Self::new(ActionKind::Turn, angle)
    }

    pub fn turn_left(angle: Expr) -> Self {
        Self::new(ActionKind::Turn, Expr::negate(angle))
    }

    pub fn ascend(delta: Expr) -> Self {
        Self::new(ActionKind::AscendDescend, delta)
    }

    pub fn descend(delta: Expr) -> Self {
        Self::new(ActionKind::AscendDescend, Expr::negate(delta))
    }

    pub fn descend_to_ground() -> Self {
        Self::new(
            ActionKind::AscendDescend,
            Expr::negate(Expr::var(Variable::Altitude)),
        )
    }

    pub fn with_speed(mut self, speed: Expr) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_duration(mut self, duration: Expr) -> Self {
        self.duration = duration;
        self
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {} speed {} for {}",
            self.kind, self.data, self.speed, self.duration
        )
    }
}

/// A named, possibly chained execution scope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mode {
    pub id: String,
    #[serde(default)]
    pub body: Vec<Stmt>,
    #[serde(default, rename = "entry")]
    pub is_entry: bool,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub submodes: HashMap<String, Rc<Mode>>,
    /// event name -> target mode id
    #[serde(default)]
    pub reactions: HashMap<String, String>,
    /// message name -> target mode id
    #[serde(default)]
    pub messages: HashMap<String, String>,
}

impl Mode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn entry(mut self) -> Self {
        self.is_entry = true;
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.body.push(Stmt::Action(action));
        self
    }

    pub fn then(mut self, next: impl Into<String>) -> Self {
        self.next = Some(next.into());
        self
    }

    pub fn on_event(mut self, event: impl Into<String>, target: impl Into<String>) -> Self {
        self.reactions.insert(event.into(), target.into());
        self
    }

    pub fn on_message(mut self, message: impl Into<String>, target: impl Into<String>) -> Self {
        self.messages.insert(message.into(), target.into());
        self
    }

    pub fn submode(mut self, mode: Mode) -> Self {
        self.submodes.insert(mode.id.clone(), Rc::new(mode));
        self
    }
}

/* ===================== Callbacks ===================== */

/// Deferred bookkeeping pushed around a mode's body
#[derive(Debug, Clone)]
pub struct Callback {
    pub label: &'static str,
    pub op: CallbackOp,
}

#[derive(Debug, Clone)]
pub enum CallbackOp {
    /// Push the mode onto the mode stack
    EnterMode(Rc<Mode>),
    /// Leave the innermost mode (pauses first when interactive)
    ExitMode,
    /// Pop the innermost mode unconditionally
    PopMode,
}

impl Callback {
    pub fn enter(mode: Rc<Mode>) -> Self {
        Self {
            label: "enter mode",
            op: CallbackOp::EnterMode(mode),
        }
    }

    pub fn exit() -> Self {
        Self {
            label: "exit mode",
            op: CallbackOp::ExitMode,
        }
    }

    pub fn pop_on_resume() -> Self {
        Self {
            label: "pop mode",
            op: CallbackOp::PopMode,
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Action(action) => write!(f, "action {}", action),
            Stmt::Mode(mode) => write!(f, "mode {}", mode.id),
            Stmt::Callback(cb) => f.write_str(cb.label),
        }
    }
}
