/// Join pre-stringified argument expressions and wrap them as a templated
/// macro invocation: `{{ project.Name(arg1,arg2) }}`.
pub fn macro_call(project_name: &str, macro_name: &str, arguments: &[String]) -> String {
    format!(
        "{{{{ {project_name}.{macro_name}({}) }}}}",
        arguments.join(",")
    )
}

/// Wrap a value as a single-quoted SQL string literal. Embedded quotes are
/// not escaped; a quote inside a column or table name corrupts the generated
/// call, which matches what the downstream macros were written against.
pub fn quoted(value: &str) -> String {
    format!("'{value}'")
}
