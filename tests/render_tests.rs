// Integration tests for rendering and the LSystem facade

use lsys_engine::{
    parse_graphics, DrawingBackend, FixedChoice, LSystem, LSystemConfig, LSystemError, Renderer,
    RngSource, Turtle,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Line(f64, f64, f64, f64),
    Translate(f64, f64),
    Rotate(f64),
    Push,
    Pop,
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl DrawingBackend for Recorder {
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.calls.push(Call::Line(x1, y1, x2, y2));
    }
    fn translate(&mut self, dx: f64, dy: f64) {
        self.calls.push(Call::Translate(dx, dy));
    }
    fn rotate(&mut self, degrees: f64) {
        self.calls.push(Call::Rotate(degrees));
    }
    fn push(&mut self) {
        self.calls.push(Call::Push);
    }
    fn pop(&mut self) {
        self.calls.push(Call::Pop);
    }
}

// Renderer

#[test]
fn test_render_dispatches_in_order() {
    let program = parse_graphics("F = forward 2\nf = leap\n+ = turn 30\nB = { push pop }").unwrap();
    let mut backend = Recorder::default();
    let summary = Renderer::new(10.0).render(&program, "F+fB", &mut backend);

    assert_eq!(
        backend.calls,
        vec![
            Call::Line(0.0, 20.0, 0.0, 0.0),
            Call::Translate(0.0, 20.0),
            Call::Rotate(30.0),
            Call::Translate(0.0, 10.0),
            Call::Push,
            Call::Pop,
        ]
    );
    assert_eq!(summary.symbols, 4);
    assert_eq!(summary.ops, 5);
    assert_eq!(summary.skipped, 0);
}

#[test]
fn test_render_skips_unmapped_symbols() {
    let program = parse_graphics("F = forward").unwrap();
    let mut backend = Recorder::default();
    let summary = Renderer::new(1.0).render(&program, "XFY", &mut backend);
    assert_eq!(backend.calls.len(), 2);
    assert_eq!(summary.symbols, 3);
    assert_eq!(summary.skipped, 2);
}

#[test]
fn test_render_unbalanced_still_draws() {
    let program = parse_graphics("] = pop\nF = forward").unwrap();
    let mut turtle = Turtle::new();
    let summary = Renderer::new(1.0).render(&program, "]F", &mut turtle);
    assert_eq!(summary.ops, 2);
    assert_eq!(turtle.segments().len(), 1);
}

#[test]
fn test_turtle_square() {
    let program = parse_graphics("F = forward\n+ = turn 90").unwrap();
    let mut turtle = Turtle::new();
    Renderer::new(10.0).render(&program, "F+F+F+F", &mut turtle);

    assert_eq!(turtle.segments().len(), 4);
    let bounds = turtle.bounds().unwrap();
    assert!((bounds.width() - 10.0).abs() < 1e-9);
    assert!((bounds.height() - 10.0).abs() < 1e-9);
    let (x, y) = turtle.position();
    assert!(x.abs() < 1e-9 && y.abs() < 1e-9);
}

#[test]
fn test_turtle_branch_returns_to_trunk() {
    let program = parse_graphics("F = forward\n[ = push\n] = pop\n+ = turn 45").unwrap();
    let mut turtle = Turtle::new();
    Renderer::new(1.0).render(&program, "F[+F]", &mut turtle);
    let (x, y) = turtle.position();
    assert!(x.abs() < 1e-9 && (y - 1.0).abs() < 1e-9);
    assert_eq!(turtle.heading(), 0.0);
}

// LSystem facade

fn koch() -> LSystemConfig {
    let mut config = LSystemConfig::new(
        "F",
        "F ==> F+F-F-F+F",
        "F = forward\n+ = turn 90\n- = turn -90",
    );
    config.iterations = 2;
    config.ignore = "+-".into();
    config
}

#[test]
fn test_lsystem_expand_and_render() {
    let system = LSystem::from_config(&koch()).unwrap();
    let expanded = system.expand(&mut FixedChoice(0)).unwrap();
    assert_eq!(expanded.chars().filter(|&c| c == 'F').count(), 25);

    let mut turtle = Turtle::new();
    let summary = system.render(&expanded, &mut turtle);
    assert_eq!(summary.skipped, 0);
    assert_eq!(turtle.segments().len(), 25);
}

#[test]
fn test_lsystem_history() {
    let system = LSystem::from_config(&koch()).unwrap();
    let history = system.history(&mut RngSource::seeded(1)).unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0], "F");
    assert_eq!(history[1], "F+F-F-F+F");
}

#[test]
fn test_lsystem_rejects_empty_axiom() {
    let mut config = koch();
    config.axiom.clear();
    assert!(matches!(
        LSystem::from_config(&config),
        Err(LSystemError::Config(_))
    ));
}

#[test]
fn test_lsystem_reports_which_grammar_failed() {
    let mut config = koch();
    config.rules = "FF ==> F".into();
    assert!(matches!(
        LSystem::from_config(&config),
        Err(LSystemError::Rules(_))
    ));

    let mut config = koch();
    config.graphics = "F = { }".into();
    let err = LSystem::from_config(&config).unwrap_err();
    assert!(matches!(err, LSystemError::Graphics(_)));
    assert!(err.to_string().starts_with("in graphics:"));
}

#[test]
fn test_lsystem_length_limit() {
    let mut config = koch();
    config.iterations = 5;
    config.max_length = Some(100);
    let system = LSystem::from_config(&config).unwrap();
    assert!(system.expand(&mut FixedChoice(0)).is_err());
}
