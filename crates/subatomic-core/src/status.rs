use crate::message::ChatMessage;
use crate::param::ParameterSpec;
use crate::session::Session;

/// Render the cumulative summary of already-resolved parameters, in
/// declaration order. Empty message when nothing is set yet.
pub fn resolved_summary(params: &[ParameterSpec], session: &Session) -> ChatMessage {
    let lines: Vec<String> = params
        .iter()
        .filter_map(|p| session.get(&p.field).map(|v| format!("✓ {}: {v}", p.key)))
        .collect();
    if lines.is_empty() {
        return ChatMessage::default();
    }
    ChatMessage::text(format!("Selected details:\n{}", lines.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_set_parameters_in_declaration_order() {
        let params = vec![
            ParameterSpec::new("teamName", "teamName"),
            ParameterSpec::new("projectName", "projectName"),
        ];
        let mut session = Session::new();
        session.set("projectName", "mercury");
        session.set("teamName", "platform");

        let msg = resolved_summary(&params, &session);
        assert_eq!(
            msg.text,
            "Selected details:\n✓ teamName: platform\n✓ projectName: mercury"
        );
    }

    #[test]
    fn empty_when_nothing_resolved() {
        let params = vec![ParameterSpec::new("teamName", "teamName")];
        let session = Session::new();
        assert!(resolved_summary(&params, &session).is_empty());
    }
}
