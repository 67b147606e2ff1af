use crate::{
    Component, Diagnostic, Dialog, MacroProperties, ParameterError, ProviderType, SchemaError,
    SqlContext,
};

/// One gem definition: dialog description, validation, lifecycle refresh, and
/// macro-call generation over an immutable properties record.
///
/// Every operation is a pure, synchronous transformation. The host owns the
/// state: it passes the current component in and stores whatever comes back.
/// `on_change` and `update_input_port_slug` replace the properties record
/// (relation names and schema snapshots re-derived from the given context)
/// and never run validation implicitly; the host calls `validate` separately
/// whenever it wants diagnostics.
pub trait MacroSpec {
    type Properties;

    fn name(&self) -> &'static str;

    fn project_name(&self) -> &'static str {
        "prophecy_spatial"
    }

    fn category(&self) -> &'static str {
        "Spatial"
    }

    fn min_input_ports(&self) -> usize {
        1
    }

    fn supported_providers(&self) -> &'static [ProviderType];

    fn dialog(&self) -> Dialog;

    fn validate(
        &self,
        context: &SqlContext,
        component: &Component<Self::Properties>,
    ) -> Vec<Diagnostic> {
        let _ = (context, component);
        Vec::new()
    }

    fn on_change(
        &self,
        context: &SqlContext,
        old_state: &Component<Self::Properties>,
        new_state: Component<Self::Properties>,
    ) -> Result<Component<Self::Properties>, SchemaError>;

    fn update_input_port_slug(
        &self,
        context: &SqlContext,
        component: Component<Self::Properties>,
    ) -> Result<Component<Self::Properties>, SchemaError>;

    /// Always callable, even with outstanding diagnostics; gating on
    /// `validate` is the host's job.
    fn apply(&self, properties: &Self::Properties) -> String;

    fn load_properties(
        &self,
        properties: &MacroProperties,
    ) -> Result<Self::Properties, ParameterError>;

    fn unload_properties(&self, properties: &Self::Properties) -> MacroProperties;
}
