//! gridcalc_engine - Formula language and cell evaluation engine.

pub mod engine;

#[cfg(test)]
mod tests {
    use crate::engine::*;

    fn sheet_with(cells: &[(usize, usize, &str)]) -> Sheet {
        let mut sheet = Sheet::default();
        for &(r, c, text) in cells {
            sheet.set_text(r, c, text).unwrap();
        }
        sheet
    }

    #[test]
    fn test_scenario_precedence() {
        let mut sheet = sheet_with(&[(0, 0, "= 2 + 3 * 4")]);
        assert_eq!(sheet.get_value(0, 0), Ok(14.0));
    }

    #[test]
    fn test_scenario_right_associative_power() {
        let mut sheet = sheet_with(&[(0, 0, "= 2 ^ 3 ^ 2")]);
        assert_eq!(sheet.get_value(0, 0), Ok(512.0));
    }

    #[test]
    fn test_scenario_reference() {
        let mut sheet = sheet_with(&[(1, 1, "= 10"), (2, 2, "= 1 @ 1 + 5")]);
        assert_eq!(sheet.get_value(2, 2), Ok(15.0));
    }

    #[test]
    fn test_scenario_two_cell_cycle() {
        let mut sheet = sheet_with(&[(0, 0, "= 0 @ 1"), (0, 1, "= 0 @ 0")]);
        assert_eq!(sheet.get_value(0, 0), Err(ErrorKind::Cycle));
        assert_eq!(sheet.get_value(0, 1), Err(ErrorKind::Cycle));
    }

    #[test]
    fn test_scenario_divide_by_zero() {
        let mut sheet = sheet_with(&[(0, 0, "= 1 / 0")]);
        assert_eq!(sheet.get_value(0, 0), Err(ErrorKind::DivByZero));
    }

    #[test]
    fn test_scenario_no_formula() {
        let mut sheet = sheet_with(&[(0, 0, "hello")]);
        assert_eq!(sheet.get_value(0, 0), Err(ErrorKind::NoFormula));
    }

    #[test]
    fn test_scenario_deeply_nested_formula() {
        let depth = 200_000;
        let text = format!("= {}1{}", "(".repeat(depth), ")".repeat(depth));
        let mut sheet = sheet_with(&[(0, 0, text.as_str()), (0, 1, "= 0 @ 0")]);
        assert_eq!(sheet.get_value(0, 0), Err(ErrorKind::SyntaxTooDeep));
        assert_eq!(sheet.get_value(0, 1), Err(ErrorKind::UpstreamError));
    }

    #[test]
    fn test_scenario_non_integer_coordinate() {
        let mut sheet = sheet_with(&[(0, 0, "= 1.5 @ 0")]);
        assert_eq!(sheet.get_value(0, 0), Err(ErrorKind::NonIntegerCoord));
    }

    #[test]
    fn test_scenario_out_of_range_reference() {
        let mut sheet = sheet_with(&[(0, 0, "= 99 @ 0")]);
        assert_eq!(sheet.get_value(0, 0), Err(ErrorKind::OutOfRange));
    }

    #[test]
    fn test_unary_minus_before_power() {
        let mut sheet = sheet_with(&[(0, 0, "= -2 ^ 2")]);
        assert_eq!(sheet.get_value(0, 0), Ok(4.0));
    }

    #[test]
    fn test_rounded_integer_coordinate_is_rejected() {
        let mut sheet = sheet_with(&[(0, 0, "= (0.1 + 0.2) * 10 - 3 @ 0"), (3, 0, "= 1")]);
        assert_eq!(sheet.get_value(0, 0), Ok((0.1 + 0.2) * 10.0 - 1.0));
        sheet.set_text(0, 1, "= ((0.1 + 0.2) * 10) @ 0").unwrap();
        assert_eq!(sheet.get_value(0, 1), Err(ErrorKind::NonIntegerCoord));
    }

    #[test]
    fn test_row_and_column_identifiers() {
        let mut sheet = sheet_with(&[(7, 3, "= r * 100 + c")]);
        assert_eq!(sheet.get_value(7, 3), Ok(703.0));
    }

    #[test]
    fn test_relative_reference_to_row_above() {
        let mut sheet = sheet_with(&[
            (0, 0, "= 1"),
            (1, 0, "= (r - 1) @ c * 2"),
            (2, 0, "= (r - 1) @ c * 2"),
        ]);
        assert_eq!(sheet.get_value(2, 0), Ok(4.0));
    }

    #[test]
    fn test_edit_recomputes_dependents() {
        let mut sheet = sheet_with(&[(0, 0, "= 1"), (0, 1, "= 0 @ 0 + 1")]);
        assert_eq!(sheet.get_value(0, 1), Ok(2.0));
        sheet.set_text(0, 0, "= 41").unwrap();
        assert_eq!(sheet.get_value(0, 1), Ok(42.0));
    }

    #[test]
    fn test_breaking_a_cycle() {
        let mut sheet = sheet_with(&[(0, 0, "= 0 @ 1"), (0, 1, "= 0 @ 0")]);
        assert_eq!(sheet.get_value(0, 1), Err(ErrorKind::Cycle));
        sheet.set_text(0, 0, "= 5").unwrap();
        assert_eq!(sheet.get_value(0, 1), Ok(5.0));
    }

    #[test]
    fn test_display_of_results() {
        let mut sheet = sheet_with(&[(0, 0, "= 1 / 3"), (0, 1, "= (2")]);
        let shown: Vec<String> = (0..2)
            .map(|c| match sheet.get_value(0, c) {
                Ok(v) => fit_to_width(&format_number(v), 18),
                Err(kind) => fit_to_width(&kind.to_string(), 18),
            })
            .collect();
        assert_eq!(shown[0], "          0.333333");
        assert_eq!(shown[1], "Syntax error: e...");
    }
}
