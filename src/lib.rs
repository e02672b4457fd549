//! Formica is a MAX-MIN Ant System (MMAS) engine for constraint
//! satisfaction problems, an implementation of the Ant-CP construction
//! scheme.
//!
//! The engine repeatedly builds variable→value assignments for a
//! user-supplied CSP. Each ant interleaves pheromone-guided value
//! selection with forward-checking propagation, forced singletons are
//! assigned without spending probabilistic decisions, and after every
//! cycle of ants the best assignments reinforce their trails under
//! [τ_min, τ_max] bounds.
//!
//! # Core Concepts
//!
//! - **[`Problem`]**: variables with finite integer domains plus a list of
//!   [`Constraint`]s. The crate provides a standard library of common
//!   constraints like [`NotEqualConstraint`] and [`AllDifferentConstraint`].
//! - **[`ForwardChecker`]**: the propagator ants consult while walking; it
//!   reduces domains and exposes forced singletons.
//! - **[`Colony`]**: the outer loop that runs m ants per cycle and one
//!   MAX-MIN pheromone update per cycle, until a solution or the cycle
//!   budget.
//!
//! # Example: A Simple 2-Variable Problem
//!
//! Solving `?x != ?y` where both variables range over `{1, 2}`:
//!
//! ```
//! use std::sync::Arc;
//!
//! use formica::aco::{
//!     colony::Colony,
//!     construction::AssignmentConstructor,
//!     parameters::AcoParameters,
//!     selection::{value::ProbabilisticSelector, variable::SmallestDomainFirst},
//!     update::MaxMinUpdate,
//! };
//! use formica::csp::{
//!     constraint::Constraint,
//!     constraints::not_equal::NotEqualConstraint,
//!     problem::Problem,
//!     propagation::ForwardChecker,
//!     variable::Variable,
//! };
//!
//! // 1. Model the problem: variables are interned by index.
//! let variables = vec![
//!     Variable::new("x", [1, 2]).unwrap(),
//!     Variable::new("y", [1, 2]).unwrap(),
//! ];
//! let constraints: Vec<Box<dyn Constraint>> = vec![Box::new(NotEqualConstraint::new(0, 1))];
//! let problem = Arc::new(Problem::new(variables, constraints).unwrap());
//!
//! // 2. Assemble the engine; the seed makes the run reproducible.
//! let mut colony = Colony::create(&problem, AcoParameters::default()).unwrap();
//! let mut propagator = ForwardChecker::new(problem.clone());
//! let mut variable_selector = SmallestDomainFirst;
//! let mut value_selector = ProbabilisticSelector::new(42);
//!
//! // 3. Solve.
//! let (result, stats) = colony
//!     .solve(
//!         &problem,
//!         &AssignmentConstructor::new(),
//!         &mut variable_selector,
//!         &mut value_selector,
//!         &MaxMinUpdate::new(),
//!         &mut propagator,
//!         100,
//!     )
//!     .unwrap();
//!
//! assert!(problem.is_solution(&result));
//! assert_ne!(result.get(0), result.get(1));
//! assert!(stats.cycles_run >= 1);
//! ```
//!
//! [`Problem`]: crate::csp::problem::Problem
//! [`Constraint`]: crate::csp::constraint::Constraint
//! [`NotEqualConstraint`]: crate::csp::constraints::not_equal::NotEqualConstraint
//! [`AllDifferentConstraint`]: crate::csp::constraints::all_different::AllDifferentConstraint
//! [`ForwardChecker`]: crate::csp::propagation::ForwardChecker
//! [`Colony`]: crate::aco::colony::Colony

pub mod aco;
pub mod csp;
pub mod error;
