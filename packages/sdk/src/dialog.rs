//! Serializable dialog descriptions. Gems declare their forms as a tree of
//! elements; the host renders the tree and writes edits back through the
//! string property bindings (`"geometryColumnName"`,
//! `"component.ports.inputs[0].schema"`, ...).

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dialog {
    pub title: String,
    pub elements: Vec<Element>,
}

impl Dialog {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            elements: Vec::new(),
        }
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    pub content: Vec<Element>,
}

impl Column {
    pub fn new(content: Vec<Element>) -> Self {
        Self {
            width: None,
            content,
        }
    }

    pub fn sized(width: impl Into<String>, content: Vec<Element>) -> Self {
        Self {
            width: Some(width.into()),
            content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Element {
    #[serde(rename_all = "camelCase")]
    ColumnsLayout {
        #[serde(skip_serializing_if = "Option::is_none")]
        gap: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        height: Option<String>,
        columns: Vec<Column>,
    },
    #[serde(rename_all = "camelCase")]
    StackLayout {
        #[serde(skip_serializing_if = "Option::is_none")]
        gap: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        height: Option<String>,
        elements: Vec<Element>,
    },
    #[serde(rename_all = "camelCase")]
    StepContainer { elements: Vec<Element> },
    #[serde(rename_all = "camelCase")]
    Step { elements: Vec<Element> },
    #[serde(rename_all = "camelCase")]
    Ports { allow_input_add_or_delete: bool },
    #[serde(rename_all = "camelCase")]
    Title { text: String },
    #[serde(rename_all = "camelCase")]
    NativeText { text: String },
    #[serde(rename_all = "camelCase")]
    AlertBox { variant: String, markdown: String },
    #[serde(rename_all = "camelCase")]
    SchemaColumnsDropdown {
        label: String,
        schema_binding: String,
        property: String,
    },
    #[serde(rename_all = "camelCase")]
    SelectBox {
        label: String,
        options: Vec<SelectOption>,
        property: String,
    },
    #[serde(rename_all = "camelCase")]
    NumberBox {
        label: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<i64>,
        property: String,
    },
    #[serde(rename_all = "camelCase")]
    TextBox {
        label: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        property: String,
    },
    #[serde(rename_all = "camelCase")]
    Checkbox { label: String, property: String },
    /// Repeated sub-record editor; `row` is rendered once per entry and its
    /// bindings are relative to the entry (`"record.<field>"`).
    #[serde(rename_all = "camelCase")]
    OrderedList {
        label: String,
        property: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        empty_container_text: Option<String>,
        row: Vec<Element>,
        allow_delete: bool,
    },
    #[serde(rename_all = "camelCase")]
    Button { label: String, action: String },
    /// Renders `then` only while the bound expression equals `equals`.
    #[serde(rename_all = "camelCase")]
    Condition {
        expression: String,
        equals: String,
        then: Vec<Element>,
    },
}

impl Element {
    pub fn columns_layout(gap: Option<&str>, height: Option<&str>, columns: Vec<Column>) -> Self {
        Self::ColumnsLayout {
            gap: gap.map(str::to_string),
            height: height.map(str::to_string),
            columns,
        }
    }

    pub fn stack_layout(gap: Option<&str>, height: Option<&str>, elements: Vec<Element>) -> Self {
        Self::StackLayout {
            gap: gap.map(str::to_string),
            height: height.map(str::to_string),
            elements,
        }
    }

    pub fn step_container(elements: Vec<Element>) -> Self {
        Self::StepContainer { elements }
    }

    pub fn step(elements: Vec<Element>) -> Self {
        Self::Step { elements }
    }

    pub fn ports() -> Self {
        Self::Ports {
            allow_input_add_or_delete: false,
        }
    }

    pub fn ports_with_add_or_delete() -> Self {
        Self::Ports {
            allow_input_add_or_delete: true,
        }
    }

    pub fn title(text: &str) -> Self {
        Self::Title {
            text: text.to_string(),
        }
    }

    pub fn native_text(text: &str) -> Self {
        Self::NativeText {
            text: text.to_string(),
        }
    }

    pub fn alert(variant: &str, markdown: &str) -> Self {
        Self::AlertBox {
            variant: variant.to_string(),
            markdown: markdown.to_string(),
        }
    }

    pub fn schema_columns_dropdown(label: &str, schema_binding: &str, property: &str) -> Self {
        Self::SchemaColumnsDropdown {
            label: label.to_string(),
            schema_binding: schema_binding.to_string(),
            property: property.to_string(),
        }
    }

    pub fn select_box(label: &str, property: &str, options: &[(&str, &str)]) -> Self {
        Self::SelectBox {
            label: label.to_string(),
            options: options
                .iter()
                .map(|(label, value)| SelectOption {
                    label: (*label).to_string(),
                    value: (*value).to_string(),
                })
                .collect(),
            property: property.to_string(),
        }
    }

    pub fn number_box(
        label: &str,
        property: &str,
        placeholder: Option<&str>,
        min: Option<i64>,
        max: Option<i64>,
    ) -> Self {
        Self::NumberBox {
            label: label.to_string(),
            placeholder: placeholder.map(str::to_string),
            min,
            max,
            property: property.to_string(),
        }
    }

    pub fn text_box(label: &str, property: &str, placeholder: Option<&str>) -> Self {
        Self::TextBox {
            label: label.to_string(),
            placeholder: placeholder.map(str::to_string),
            property: property.to_string(),
        }
    }

    pub fn checkbox(label: &str, property: &str) -> Self {
        Self::Checkbox {
            label: label.to_string(),
            property: property.to_string(),
        }
    }

    pub fn button(label: &str, action: &str) -> Self {
        Self::Button {
            label: label.to_string(),
            action: action.to_string(),
        }
    }

    pub fn condition(expression: &str, equals: &str, then: Vec<Element>) -> Self {
        Self::Condition {
            expression: expression.to_string(),
            equals: equals.to_string(),
            then,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Column, Dialog, Element};

    #[test]
    fn dialog_serializes_to_tagged_json() {
        let dialog = Dialog::new("Buffer").with_element(Element::columns_layout(
            Some("1rem"),
            Some("100%"),
            vec![
                Column::sized("content", vec![Element::ports_with_add_or_delete()]),
                Column::new(vec![Element::schema_columns_dropdown(
                    "Geometry column",
                    "component.ports.inputs[0].schema",
                    "geometryColumnName",
                )]),
            ],
        ));

        let json = serde_json::to_value(&dialog).expect("dialog should serialize");

        assert_eq!(json["title"], "Buffer");
        assert_eq!(json["elements"][0]["kind"], "columnsLayout");
        assert_eq!(json["elements"][0]["columns"][0]["width"], "content");
        assert_eq!(
            json["elements"][0]["columns"][1]["content"][0]["kind"],
            "schemaColumnsDropdown"
        );
        assert_eq!(
            json["elements"][0]["columns"][1]["content"][0]["property"],
            "geometryColumnName"
        );
    }

    #[test]
    fn select_box_preserves_option_order() {
        let element = Element::select_box(
            "Units",
            "unit",
            &[("Miles", "miles"), ("Kilometers", "kms")],
        );

        let json = serde_json::to_value(&element).expect("select box should serialize");

        assert_eq!(json["options"][0]["value"], "miles");
        assert_eq!(json["options"][1]["value"], "kms");
    }
}
