//! Required-parameter checks.

use crate::error::Error;
use crate::params::ParamsBag;

/// Check that every name in `required` is present in `params`.
///
/// A missing bag counts as a bag with nothing in it. On failure the error
/// names every absent parameter, in the order given.
pub fn missing_params(params: Option<&ParamsBag>, required: &[&str]) -> Result<(), Error> {
    let missing: Vec<String> = required
        .iter()
        .filter(|name| !params.is_some_and(|bag| bag.contains(name)))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingRequiredParameters(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nothing_required_accepts_absent_bag() {
        assert!(missing_params(None, &[]).is_ok());
    }

    #[test]
    fn absent_bag_reports_every_required_name() {
        let err = missing_params(None, &["dataIntgFlowId", "dataIntgFlowName"]).unwrap_err();
        match err {
            Error::MissingRequiredParameters(names) => {
                assert_eq!(names, vec!["dataIntgFlowId", "dataIntgFlowName"])
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reports_only_the_missing_ones() {
        let bag = ParamsBag::from_json(json!({"dataIntgFlowId": "abc"}));
        let err = missing_params(Some(&bag), &["dataIntgFlowId", "dataIntgFlowName"]).unwrap_err();
        assert_eq!(err.to_string(), "Missing required parameters: dataIntgFlowName");
    }

    #[test]
    fn present_values_pass() {
        let mut bag = ParamsBag::new();
        bag.set("id", json!(["a", "b"]));
        assert!(missing_params(Some(&bag), &["id"]).is_ok());
    }

    #[test]
    fn binary_value_counts_as_present() {
        let mut bag = ParamsBag::new();
        bag.set_binary("body", vec![1u8, 2, 3]);
        assert!(missing_params(Some(&bag), &["body"]).is_ok());
    }

    #[test]
    fn null_is_absent_but_empty_string_is_present() {
        let bag = ParamsBag::from_json(json!({"dataIntgFlowId": "", "dataIntgFlowName": null}));
        let err = missing_params(Some(&bag), &["dataIntgFlowId", "dataIntgFlowName"]).unwrap_err();
        assert_eq!(err.to_string(), "Missing required parameters: dataIntgFlowName");
    }
}
