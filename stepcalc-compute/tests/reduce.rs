use assert_float_eq::{
    afe_abs,
    afe_relative_error_msg,
    afe_is_relative_eq,
    assert_float_relative_eq,
};
use pretty_assertions::assert_eq;
use stepcalc_compute::{
    collab::{Collaborator, ComputeError, Deterministic, Resolution, Scripted},
    reduce::{
        error::{
            kind::{ComputationFailure, DecisionFailure, StepBudgetExceeded, UnknownTool},
            EmptyExpression,
            InvalidCharacter,
        },
        Reducer,
        Reduction,
        ReduceOptions,
        ReduceOptionsBuilder,
        Seed,
    },
    step_collector::FnCollector,
    wire::decode_decision,
};
use stepcalc_parser::{parse_number, BinOpKind, PendingOperation};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Reduces the given input with the default options and collaborator.
fn reduce(seed: impl Into<Seed>) -> Reduction {
    init_logger();
    Reducer::default().run(seed)
}

/// Reduces the given input with the given options and the default collaborator.
fn reduce_with(options: ReduceOptions, seed: impl Into<Seed>) -> Reduction {
    init_logger();
    Reducer::with_options(options).run(seed)
}

/// Always decides an operation that inserts a digit instead of removing an operator.
#[derive(Debug, Default)]
struct Stalling;

impl Collaborator for Stalling {
    fn decide(&mut self, _: &str) -> Result<PendingOperation, String> {
        Ok(PendingOperation::new(BinOpKind::Add, "0", "0", Some(0..0)))
    }

    fn compute(&mut self, _: &str, lhs: f64, rhs: f64) -> Result<f64, ComputeError> {
        Ok(lhs + rhs)
    }
}

/// Replays recorded decisions, but computes with the built-in tools.
#[derive(Debug)]
struct RecordedDecisions {
    decisions: Vec<&'static str>,
    tools: Deterministic,
}

impl Collaborator for RecordedDecisions {
    fn decide(&mut self, _: &str) -> Result<PendingOperation, String> {
        if self.decisions.is_empty() {
            return Err("out of decisions".to_string());
        }
        decode_decision(self.decisions.remove(0))
    }

    fn compute(&mut self, tool: &str, lhs: f64, rhs: f64) -> Result<f64, ComputeError> {
        self.tools.compute(tool, lhs, rhs)
    }
}

#[test]
fn single_numbers_take_no_steps() {
    for input in ["7", "-3.5", "2e10", "  42  ", ".5", "+1"] {
        let reduction = reduce(input);
        assert_eq!(reduction.history, [input], "{input:?}");
        assert_eq!(reduction.result.as_deref(), Some(input), "{input:?}");
        assert_eq!(reduction.steps, 0);
        assert!(reduction.error.is_none());
    }
}

#[test]
fn multiplication_before_addition() {
    let reduction = reduce("1+2*3");
    assert_eq!(reduction.history, ["1+2*3", "1+6", "7"]);
    assert_eq!(reduction.result.as_deref(), Some("7"));
    assert_eq!(reduction.steps, 2);
}

#[test]
fn one_step_per_operator() {
    let reduction = reduce("10-4+3*2/6");
    assert_eq!(reduction.history, ["10-4+3*2/6", "10-4+6/6", "10-4+1", "6+1", "7"]);
    assert_eq!(reduction.steps, 4);
}

#[test]
fn parenthesized_groups_first() {
    let reduction = reduce("1+2*3+(3-1)*4/2");
    assert_eq!(reduction.history, [
        "1+2*3+(3-1)*4/2",
        "1+2*3+2*4/2",
        "1+6+2*4/2",
        "1+6+8/2",
        "1+6+4",
        "7+4",
        "11",
    ]);
    assert_eq!(reduction.result.as_deref(), Some("11"));
}

#[test]
fn nested_groups_collapse() {
    let reduction = reduce("2*((1+2)*3)");
    assert_eq!(reduction.history, ["2*((1+2)*3)", "2*(3*3)", "2*9", "18"]);
}

#[test]
fn flat_resolution_ignores_groups() {
    init_logger();
    let mut reducer = Reducer::new(ReduceOptions::default(), Deterministic::new(Resolution::Flat));
    let reduction = reducer.run("(1+2)*3");

    // `2)*3` is reduced first, leaving a group that can no longer be closed
    assert_eq!(reduction.history, ["(1+2)*3", "(1+6", "(7"]);
    assert!(reduction.error.as_ref().is_some_and(|err| err.is::<DecisionFailure>()));

    assert_eq!(reduce("(1+2)*3").result.as_deref(), Some("9"));
}

#[test]
fn signed_operands() {
    let reduction = reduce("-2*-3+1");
    assert_eq!(reduction.history, ["-2*-3+1", "6+1", "7"]);

    let reduction = reduce("1-5*2");
    assert_eq!(reduction.history, ["1-5*2", "1-10", "-9"]);
}

#[test]
fn non_integer_results() {
    let reduction = reduce("7/2");
    assert_eq!(reduction.result.as_deref(), Some("3.5"));

    let reduction = reduce("0.1+0.2");
    assert_eq!(reduction.result.as_deref(), Some("0.30000000000000004"));

    let reduction = reduce("1e-7*3");
    let result = reduction.result.as_deref().and_then(parse_number).unwrap();
    assert_float_relative_eq!(result, 3e-7);
}

#[test]
fn empty_input_becomes_zero() {
    for seed in [Seed::from(""), Seed::from("   "), Seed::Missing, Seed::History(Vec::new())] {
        let reduction = reduce(seed);
        assert_eq!(reduction.history, ["0"]);
        assert_eq!(reduction.result.as_deref(), Some("0"));
    }
}

#[test]
fn empty_input_without_default() {
    let options = ReduceOptionsBuilder::new()
        .default_expression(None::<String>)
        .build();
    let reduction = reduce_with(options, "");
    assert!(reduction.history.is_empty());
    assert!(reduction.error.as_ref().is_some_and(|err| err.is::<EmptyExpression>()));
    assert_eq!(reduction.error_message().as_deref(), Some("expression is empty"));
}

#[test]
fn custom_default_expression() {
    let options = ReduceOptionsBuilder::new()
        .default_expression(Some("2+2"))
        .build();
    let reduction = reduce_with(options, Seed::Missing);
    assert_eq!(reduction.history, ["2+2", "4"]);
}

#[test]
fn division_by_zero() {
    let reduction = reduce("5/0");
    assert_eq!(reduction.history, ["5/0"]);
    assert_eq!(reduction.result, None);
    assert_eq!(reduction.steps, 0);

    let error = reduction.error.as_ref().unwrap();
    assert_eq!(
        error.downcast_ref::<ComputationFailure>(),
        Some(&ComputationFailure { reason: "division by zero".to_string() }),
    );
    assert_eq!(error.spans, [0..3]);
}

#[test]
fn failure_keeps_earlier_snapshots() {
    let reduction = reduce("1+4/(2-2)");
    assert_eq!(reduction.history, ["1+4/(2-2)", "1+4/0"]);
    assert_eq!(reduction.failed_expression(), Some("1+4/0"));
    assert!(reduction.error_message().unwrap().contains("division by zero"));
    assert_eq!(reduction.error.as_ref().unwrap().spans, [2..5]);
}

#[test]
fn irreducible_expression() {
    let reduction = reduce("1+");
    assert_eq!(reduction.history, ["1+"]);
    assert!(reduction.error.as_ref().is_some_and(|err| err.is::<DecisionFailure>()));
}

#[test]
fn dangling_operator_blocks_reduction() {
    init_logger();
    let reduction = reduce("1+2*");
    assert_eq!(reduction.history, ["1+2*"]);
    assert!(reduction.error.as_ref().is_some_and(|err| err.is::<DecisionFailure>()));

    let mut reducer = Reducer::new(ReduceOptions::default(), Deterministic::new(Resolution::Flat));
    let reduction = reducer.run("1+2*");
    assert_eq!(reduction.history, ["1+2*"]);
    assert!(reduction.error.as_ref().is_some_and(|err| err.is::<DecisionFailure>()));
}

#[test]
fn separated_literals_stay_separate() {
    let reduction = reduce("(2 3)+4");
    assert_eq!(reduction.history, ["(2 3)+4", "(2 7"]);
    assert!(reduction.error.as_ref().is_some_and(|err| err.is::<DecisionFailure>()));
}

#[test]
fn step_budget() {
    init_logger();
    let options = ReduceOptionsBuilder::new().max_steps(5).build();
    let reduction = Reducer::new(options, Stalling).run("1+1");
    assert_eq!(reduction.steps, 5);
    assert_eq!(reduction.history.len(), 6);
    assert_eq!(reduction.history.last().map(String::as_str), Some("000001+1"));

    let error = reduction.error.as_ref().unwrap();
    assert_eq!(error.downcast_ref::<StepBudgetExceeded>(), Some(&StepBudgetExceeded { max_steps: 5 }));
}

#[test]
fn step_budget_allows_exact_fit() {
    let options = ReduceOptionsBuilder::new().max_steps(2).build();
    assert_eq!(reduce_with(options.clone(), "1+2*3").result.as_deref(), Some("7"));

    let reduction = reduce_with(options, "1+2*3-4");
    assert_eq!(reduction.history, ["1+2*3-4", "1+6-4", "7-4"]);
    assert!(reduction.error.as_ref().is_some_and(|err| err.is::<StepBudgetExceeded>()));
}

#[test]
fn strict_validation() {
    let strict = ReduceOptionsBuilder::new().strict(true).build();
    let reduction = reduce_with(strict.clone(), "1+a");
    assert_eq!(reduction.history, ["1+a"]);
    assert_eq!(
        reduction.error.as_ref().and_then(|err| err.downcast_ref::<InvalidCharacter>()),
        Some(&InvalidCharacter { found: 'a' }),
    );
    assert_eq!(reduction.error.as_ref().unwrap().spans, [2..3]);

    // valid expressions are unaffected
    assert_eq!(reduce_with(strict, "(1 + 2) * 3").result.as_deref(), Some("9"));

    // without strict validation, the character is skipped and the expression is left dangling
    let reduction = reduce("1+a");
    assert!(reduction.error.as_ref().is_some_and(|err| err.is::<DecisionFailure>()));
}

#[test]
fn resume_from_history() {
    let history = vec!["1+2*3".to_string(), "1+6".to_string()];
    let reduction = reduce(history);
    assert_eq!(reduction.history, ["1+2*3", "1+6", "7"]);
    assert_eq!(reduction.steps, 1);
}

#[test]
fn scripted_replay() {
    init_logger();
    let collab = Scripted::new(
        [
            r#"{"operator": "*", "lhs": "2", "rhs": "3", "span": [2, 5], "tool": "mul"}"#,
            "```json\n{\"operator\": \"+\", \"lhs\": 1, \"rhs\": 6, \"span\": [0, 3]}\n```",
        ],
        [r#"{"value": 6}"#, r#"{"value": "7"}"#],
    );
    let mut reducer = Reducer::new(ReduceOptions::default(), collab);
    let reduction = reducer.run("1+2*3");
    assert_eq!(reduction.history, ["1+2*3", "1+6", "7"]);
    assert!(reducer.collaborator_mut().is_exhausted());
}

#[test]
fn scripted_tool_error() {
    let collab = Scripted::new(
        [r#"{"operator": "/", "lhs": "5", "rhs": "0", "span": [0, 3]}"#],
        [r#"{"error": "cannot divide by zero"}"#],
    );
    let reduction = Reducer::new(ReduceOptions::default(), collab).run("5/0");
    assert_eq!(reduction.history, ["5/0"]);
    assert_eq!(reduction.error_message().as_deref(), Some("computation failed: cannot divide by zero"));
}

#[test]
fn scripted_malformed_responses() {
    let collab = Scripted::new([r#"{"operator": "+"}"#], [""; 0]);
    let reduction = Reducer::new(ReduceOptions::default(), collab).run("1+2");
    assert!(reduction.error.as_ref().is_some_and(|err| err.is::<DecisionFailure>()));

    let collab = Scripted::new(
        [r#"{"operator": "+", "lhs": "1", "rhs": "2", "span": [0, 3]}"#],
        [r#"{"value": "three"}"#],
    );
    let reduction = Reducer::new(ReduceOptions::default(), collab).run("1+2");
    assert!(reduction.error.as_ref().is_some_and(|err| err.is::<ComputationFailure>()));
    assert_eq!(reduction.history, ["1+2"]);
}

#[test]
fn scripted_arrays_are_rejected() {
    let collab = Scripted::new([r#"["*", "2", "3"]"#], [""; 0]);
    let reduction = Reducer::new(ReduceOptions::default(), collab).run("2*3");
    assert!(reduction.error.as_ref().is_some_and(|err| err.is::<DecisionFailure>()));
    assert_eq!(reduction.history, ["2*3"]);

    let collab = Scripted::new(
        [r#"{"operator": "*", "lhs": "2", "rhs": "3", "span": [0, 3]}"#],
        ["[6]"],
    );
    let reduction = Reducer::new(ReduceOptions::default(), collab).run("2*3");
    assert!(reduction.error.as_ref().is_some_and(|err| err.is::<ComputationFailure>()));
    assert_eq!(reduction.history, ["2*3"]);
}

#[test]
fn out_of_bounds_span() {
    let collab = RecordedDecisions {
        decisions: vec![r#"{"operator": "+", "lhs": "1", "rhs": "2", "span": [0, 30]}"#],
        tools: Deterministic::default(),
    };
    let reduction = Reducer::new(ReduceOptions::default(), collab).run("1+2");
    assert_eq!(reduction.history, ["1+2"]);
    assert!(reduction.error_message().unwrap().starts_with("expression update failed"));
}

#[test]
fn unknown_tool() {
    let collab = RecordedDecisions {
        decisions: vec![r#"{"operator": "*", "lhs": "2", "rhs": "3", "span": [0, 3], "tool": "mult"}"#],
        tools: Deterministic::default(),
    };
    let reduction = Reducer::new(ReduceOptions::default(), collab).run("2*3");
    assert_eq!(
        reduction.error.as_ref().and_then(|err| err.downcast_ref::<UnknownTool>()),
        Some(&UnknownTool { name: "mult".to_string(), suggestions: vec!["mul".to_string()] }),
    );
}

#[test]
fn collector_sees_every_snapshot() {
    init_logger();
    let mut seen = Vec::new();
    let reduction = Reducer::default().run_with("1+2*3+(3-1)*4/2", &mut seen);
    assert_eq!(seen, reduction.history);

    let mut count = 0;
    Reducer::default().run_with("5/0", &mut FnCollector(|_: String| count += 1));
    assert_eq!(count, 1);
}

#[test]
fn report_points_at_failed_snapshot() {
    let reduction = reduce("1+4/(2-2)");
    let mut buf = Vec::new();
    reduction.write_report("input", &mut buf).unwrap();

    let report = String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap();
    assert!(report.contains("computation failed: division by zero"));
    assert!(report.contains("1+4/0"));

    // successful runs have nothing to report
    let mut buf = Vec::new();
    reduce("1+1").write_report("input", &mut buf).unwrap();
    assert!(buf.is_empty());
}

#[test]
fn json_summary() {
    let summary = reduce("5/0").summary();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json, serde_json::json!({
        "expression": "5/0",
        "result": null,
        "history": ["5/0"],
        "error": "computation failed: division by zero",
        "steps": 0,
    }));
}
