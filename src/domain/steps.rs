use serde_json::Value;

/// Coerce a raw `pasos` value into the canonical numbered-text form:
/// one step per line, each prefixed with a 1-based ordinal (`1. ...`).
pub fn normalize_steps(raw: &Value) -> String {
    match raw {
        Value::Array(items) => {
            let steps: Vec<String> = items
                .iter()
                .map(step_text)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            number_lines(&steps)
        }
        Value::String(text) => normalize_step_text(text),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn normalize_step_text(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }
    // Already carries an ordinal marker; leave the author's numbering alone.
    if text.contains("1.") || text.contains("1)") {
        return text.to_string();
    }

    // Newline wins over semicolon when both are present.
    for sep in ['\n', ';'] {
        if text.contains(sep) {
            let parts: Vec<String> = text
                .split(sep)
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();
            return number_lines(&parts);
        }
    }

    format!("1. {}", text)
}

fn number_lines(steps: &[String]) -> String {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step))
        .collect::<Vec<_>>()
        .join("\n")
}

fn step_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn list_of_steps_is_numbered_in_order() {
        let raw = json!(["Abrir la app", "Iniciar sesión", "Validar el menú"]);
        assert_eq!(
            normalize_steps(&raw),
            "1. Abrir la app\n2. Iniciar sesión\n3. Validar el menú"
        );
    }

    #[test]
    fn blank_list_elements_are_dropped_without_gaps() {
        let raw = json!(["Primero", "   ", "", "Segundo"]);
        assert_eq!(normalize_steps(&raw), "1. Primero\n2. Segundo");
    }

    #[test]
    fn non_string_list_elements_are_rendered() {
        let raw = json!([1, "dos", true]);
        assert_eq!(normalize_steps(&raw), "1. 1\n2. dos\n3. true");
    }

    #[test]
    fn string_with_existing_numbering_passes_through() {
        let raw = json!("1. Abrir\n2. Cerrar");
        assert_eq!(normalize_steps(&raw), "1. Abrir\n2. Cerrar");
    }

    #[test]
    fn string_with_paren_numbering_passes_through() {
        let raw = json!("1) Abrir 2) Cerrar");
        assert_eq!(normalize_steps(&raw), "1) Abrir 2) Cerrar");
    }

    #[test]
    fn string_split_prefers_newline_over_semicolon() {
        let raw = json!("Abrir; validar\nCerrar sesión");
        assert_eq!(normalize_steps(&raw), "1. Abrir; validar\n2. Cerrar sesión");
    }

    #[test]
    fn string_split_on_semicolon() {
        let raw = json!("Abrir la app; Cerrar la app;  ");
        assert_eq!(normalize_steps(&raw), "1. Abrir la app\n2. Cerrar la app");
    }

    #[test]
    fn bare_string_becomes_single_step() {
        let raw = json!("  Abrir la app  ");
        assert_eq!(normalize_steps(&raw), "1. Abrir la app");
    }

    #[test]
    fn empty_inputs_produce_empty_output() {
        assert_eq!(normalize_steps(&json!("")), "");
        assert_eq!(normalize_steps(&json!("   ")), "");
        assert_eq!(normalize_steps(&json!([])), "");
        assert_eq!(normalize_steps(&Value::Null), "");
    }

    #[test]
    fn scalar_input_is_rendered_without_numbering() {
        assert_eq!(normalize_steps(&json!(42)), "42");
        assert_eq!(normalize_steps(&json!(true)), "true");
    }

    fn non_blank_step() -> impl Strategy<Value = String> {
        "[a-zA-Z][a-zA-Z ]{0,20}[a-zA-Z]".prop_map(|s| s.to_string())
    }

    proptest! {
        // Contiguous ordinals over the non-blank elements, in original
        // order, no matter how many blanks are interspersed.
        #[test]
        fn ordinals_are_contiguous(
            steps in prop::collection::vec(non_blank_step(), 1..12),
            blank_at in prop::collection::vec(any::<bool>(), 1..12),
        ) {
            let mut items = Vec::new();
            for (i, step) in steps.iter().enumerate() {
                if *blank_at.get(i % blank_at.len()).unwrap_or(&false) {
                    items.push(Value::String("   ".to_string()));
                }
                items.push(Value::String(step.clone()));
            }

            let out = normalize_steps(&Value::Array(items));
            let lines: Vec<&str> = out.lines().collect();
            prop_assert_eq!(lines.len(), steps.len());
            for (i, line) in lines.iter().enumerate() {
                let expected = format!("{}. {}", i + 1, steps[i].trim());
                prop_assert_eq!(*line, expected.as_str());
            }
        }
    }
}
