//! Integration tests for a host that hands over its type model as JSON and
//! brings its own rule.

use doctrine_lint_core::{
    Analyzer, CapabilityRegistry, DoctrineCategory, OutputFormat, Reporter, Rule, RuleDescriptor,
    Severity, TypeContext, TypeDescriptor, Violation,
};

static NO_MUTABLE_STATE: RuleDescriptor = RuleDescriptor {
    id: "ACME001",
    name: "no-mutable-state",
    category: DoctrineCategory::ImmutableContract,
    severity: Severity::Warning,
    title: "Immutable contracts hold no settable state",
    message_format: "Property '{0}' on '{1}' has a setter",
    description: "",
};

struct NoMutableState;

impl Rule for NoMutableState {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &NO_MUTABLE_STATE
    }

    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation> {
        ctx.ty
            .properties
            .iter()
            .filter(|p| p.setter.is_some())
            .map(|p| {
                ctx.at(
                    self.descriptor(),
                    &p.location,
                    vec![p.name.clone(), ctx.ty.name.clone()],
                )
            })
            .collect()
    }
}

const MODEL: &str = r#"[
  {
    "name": "OkResult",
    "is_sealed": true,
    "interfaces": ["Zentient.Abstractions.Results.IResult"],
    "properties": [
      { "name": "Errors", "getter": { "body": { "kind": "auto" } } },
      {
        "name": "IsSuccess",
        "getter": { "body": { "kind": "computed", "referenced_members": ["Errors"] } },
        "setter": "private",
        "location": { "file": "src/OkResult.cs", "line": 9, "column": 17 }
      }
    ],
    "location": { "file": "src/OkResult.cs", "line": 3, "column": 21 }
  },
  {
    "name": "IResultFactory",
    "kind": "interface",
    "interfaces": ["Zentient.Abstractions.Results.IResult"]
  },
  { "name": "Clock", "interfaces": ["System.IDisposable"] }
]"#;

fn analyzer() -> Analyzer {
    Analyzer::builder()
        .rule(NoMutableState)
        .registry(CapabilityRegistry::zentient())
        .build_sequential()
}

#[test]
fn host_model_deserializes_and_evaluates() {
    let types: Vec<TypeDescriptor> = serde_json::from_str(MODEL).expect("model");
    assert_eq!(types.len(), 3);
    assert!(types[0].find_property("IsSuccess").is_some_and(|p| p.is_computed()));

    let result = analyzer().analyze(&types).expect("analysis");
    assert_eq!(result.types_checked, 2);
    assert_eq!(result.violations.len(), 1);

    let violation = &result.violations[0];
    assert_eq!(violation.code, "ACME001");
    assert_eq!(violation.severity, Severity::Warning);
    assert_eq!(violation.location.line, 9);
    insta::assert_snapshot!(violation.message, @"Property 'IsSuccess' on 'OkResult' has a setter");
}

#[test]
fn empty_registry_classifies_nothing() {
    let types: Vec<TypeDescriptor> = serde_json::from_str(MODEL).expect("model");
    let analyzer = Analyzer::builder()
        .rule(NoMutableState)
        .registry(CapabilityRegistry::empty())
        .build_sequential();
    assert!(analyzer.evaluate_type(&types[0]).is_empty());
}

#[test]
fn reports_render_in_every_format() {
    let types: Vec<TypeDescriptor> = serde_json::from_str(MODEL).expect("model");
    let result = analyzer().analyze(&types).expect("analysis");

    let compact = Reporter::new(OutputFormat::Compact)
        .render(&result)
        .expect("compact");
    assert_eq!(compact.lines().count(), 1);
    assert!(compact.contains("ACME001"));

    let text = Reporter::new(OutputFormat::Text).render(&result).expect("text");
    assert!(text.ends_with("Found 0 error(s), 1 warning(s), 0 info(s) in 2 type(s)\n"));

    let json = Reporter::new(OutputFormat::Json).render(&result).expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["types_checked"], 2);
    assert_eq!(value["violations"][0]["code"], "ACME001");
    assert_eq!(value["violations"][0]["severity"], "warning");
}
