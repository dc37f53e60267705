/////////////////////////////TESTS////////////////////////////////////////////////////
/*
tests:
parsing of single elements (identifier, value, pair, section)
whole documents with several sections
comments and blank lines
template merging
file-based parsing
malformed documents
*/

#[cfg(test)]
mod tests_task_parser {
    use crate::Utils::task_parser::{
        Value, filter_comments, parse_document, parse_identifier, parse_key_value_pair,
        parse_section, parse_task_document, parse_task_file, parse_value, template_from,
    };
    use std::io::Write;

    #[test]
    fn test_parse_identifier() {
        let (remaining, title) = parse_identifier("interval\n lower_lim: -1").unwrap();
        assert_eq!(title, "interval");
        assert_eq!(remaining, "\n lower_lim: -1");

        let (remaining, key) = parse_identifier("start_il: 1").unwrap();
        assert_eq!(key, "start_il");
        assert_eq!(remaining, ": 1");

        assert!(parse_identifier("1abc").is_err());
    }

    #[test]
    fn test_parse_value_types() {
        let (remaining, value) = parse_value("-2, 1").unwrap();
        assert_eq!(value, Value::Integer(-2));
        assert_eq!(remaining, ", 1");

        let (_, value) = parse_value("0.01").unwrap();
        assert_eq!(value, Value::Float(0.01));

        let (_, value) = parse_value("false").unwrap();
        assert_eq!(value, Value::Boolean(false));

        let (_, value) = parse_value("riemann_sums.png").unwrap();
        assert_eq!(value, Value::String("riemann_sums.png".to_string()));
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Integer(3).as_float(), Some(3.0));
        assert_eq!(Value::Float(0.5).as_float(), Some(0.5));
        assert_eq!(Value::Boolean(true).as_float(), None);
        assert_eq!(Value::Boolean(true).as_boolean(), Some(true));
        assert_eq!(Value::String("true".to_string()).as_boolean(), None);
        assert_eq!(Value::Float(0.25).to_string(), "0.25");
    }

    #[test]
    fn test_parse_pairs() {
        let (remaining, (key, values)) = parse_key_value_pair("coefficients: 3, 3, -2, 1").unwrap();
        assert_eq!(key, "coefficients");
        assert_eq!(
            values,
            vec![
                Value::Integer(3),
                Value::Integer(3),
                Value::Integer(-2),
                Value::Integer(1)
            ]
        );
        assert_eq!(remaining, "");

        let (remaining, (key, values)) = parse_key_value_pair("end_il : 0.01 gif: a.gif").unwrap();
        assert_eq!(key, "end_il");
        assert_eq!(values, vec![Value::Float(0.01)]);
        assert_eq!(remaining, " gif: a.gif");

        // values may start on the next line
        let (_, (_, values)) = parse_key_value_pair("coefficients:\n 1, 2").unwrap();
        assert_eq!(values, vec![Value::Integer(1), Value::Integer(2)]);

        assert!(parse_key_value_pair("interval lower_lim: 0").is_err());
    }

    #[test]
    fn test_parse_section() {
        let input = "animation rule: right start_il: 1 end_il: 0.01";
        let (remaining, (title, map)) = parse_section(input).unwrap();
        assert_eq!(title, "animation");
        assert_eq!(map.len(), 3);
        assert_eq!(map["rule"], Some(vec![Value::String("right".to_string())]));
        assert_eq!(map["start_il"], Some(vec![Value::Integer(1)]));
        assert_eq!(map["end_il"], Some(vec![Value::Float(0.01)]));
        assert_eq!(remaining, "");

        // trailing title of the next section is left unparsed
        let (remaining, (_, map)) = parse_section("interval lower_lim: 0 upper_lim: 2 polynomial").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(remaining, "polynomial");
    }

    #[test]
    fn test_parse_document_sections() {
        let input = "polynomial\ncoefficients: 1, 0, 0\ninterval\nlower_lim: 0 upper_lim: 1";
        let (remaining, doc) = parse_document(input).unwrap();
        assert_eq!(remaining, "");
        assert_eq!(doc.len(), 2);
        assert_eq!(
            doc["polynomial"]["coefficients"],
            Some(vec![Value::Integer(1), Value::Integer(0), Value::Integer(0)])
        );
        assert_eq!(doc["interval"]["lower_lim"], Some(vec![Value::Integer(0)]));
    }

    #[test]
    fn test_comments_are_filtered() {
        let input = "# task\npolynomial\n// cubic\ncoefficients: 1, 2\n\n% end\n";
        assert_eq!(filter_comments(input), "polynomial\ncoefficients: 1, 2");
        let doc = parse_task_document(input, None).unwrap();
        assert_eq!(
            doc["polynomial"]["coefficients"],
            Some(vec![Value::Integer(1), Value::Integer(2)])
        );
    }

    #[test]
    fn test_template_fills_missing_keys() {
        let template = template_from(&[
            ("interval", &["lower_lim", "upper_lim"][..]),
            ("logging", &["loglevel"][..]),
        ]);
        let doc = parse_task_document("interval lower_lim: -2", Some(&template)).unwrap();
        assert_eq!(doc["interval"]["lower_lim"], Some(vec![Value::Integer(-2)]));
        assert_eq!(doc["interval"]["upper_lim"], None);
        assert_eq!(doc["logging"]["loglevel"], None);

        let empty = parse_task_document("# nothing here\n", Some(&template)).unwrap();
        assert_eq!(empty.len(), 2);
        assert_eq!(empty["interval"]["lower_lim"], None);
    }

    #[test]
    fn test_malformed_document() {
        assert!(parse_task_document("interval lower_lim: 1 !!!", None).is_err());
        assert!(parse_task_document("just_a_title", None).is_err());
    }

    #[test]
    fn test_parse_task_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# refinement settings").unwrap();
        writeln!(file, "animation").unwrap();
        writeln!(file, "rule: trap start_il: 0.5 end_il: 0.05").unwrap();
        let doc = parse_task_file(file.path(), None).unwrap();
        assert_eq!(doc["animation"]["rule"], Some(vec![Value::String("trap".to_string())]));
        assert_eq!(doc["animation"]["end_il"], Some(vec![Value::Float(0.05)]));

        assert!(parse_task_file("/definitely/not/here.txt", None).is_err());
    }
}
