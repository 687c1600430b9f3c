#[cfg(test)]
mod scanner_tests {
    use treelox::error::Diagnostics;
    use treelox::scanner::{scan_tokens, Scanner};
    use treelox::token::TokenType;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source.as_bytes());
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn one_and_two_char_operators() {
        assert_token_sequence(
            "! != = == < <= > >=",
            &[
                (TokenType::BANG, "!"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn comments_are_discarded_division_is_not() {
        assert_token_sequence(
            "1 / 2 // the rest is gone ;\n3",
            &[
                (TokenType::NUMBER(1.0), "1"),
                (TokenType::SLASH, "/"),
                (TokenType::NUMBER(2.0), "2"),
                (TokenType::NUMBER(3.0), "3"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn string_literal_payload_drops_quotes() {
        let scanner = Scanner::new(br#""hello there""#);
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].lexeme, "\"hello there\"");

        match &tokens[0].token_type {
            TokenType::STRING(contents) => assert_eq!(contents, "hello there"),
            other => panic!("expected a string token, got {:?}", other),
        }
    }

    #[test]
    fn strings_may_span_lines() {
        let scanner = Scanner::new(b"\"a\nb\"\nafter");
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), 3);

        match &tokens[0].token_type {
            TokenType::STRING(contents) => assert_eq!(contents, "a\nb"),
            other => panic!("expected a string token, got {:?}", other),
        }

        // The embedded and trailing newlines both advanced the line counter.
        assert_eq!(tokens[1].lexeme, "after");
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn numbers_leave_a_trailing_dot_alone() {
        assert_token_sequence(
            "123 45.67 89.",
            &[
                (TokenType::NUMBER(123.0), "123"),
                (TokenType::NUMBER(45.67), "45.67"),
                (TokenType::NUMBER(89.0), "89"),
                (TokenType::DOT, "."),
                (TokenType::EOF, ""),
            ],
        );

        let scanner = Scanner::new(b"45.67");
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        match tokens[0].token_type {
            TokenType::NUMBER(n) => assert_eq!(n, 45.67),
            ref other => panic!("expected a number token, got {:?}", other),
        }
    }

    #[test]
    fn keywords_versus_identifiers() {
        assert_token_sequence(
            "var varnish class classy _under score99",
            &[
                (TokenType::VAR, "var"),
                (TokenType::IDENTIFIER, "varnish"),
                (TokenType::CLASS, "class"),
                (TokenType::IDENTIFIER, "classy"),
                (TokenType::IDENTIFIER, "_under"),
                (TokenType::IDENTIFIER, "score99"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn unexpected_characters_are_errors_but_scanning_continues() {
        let scanner = Scanner::new(b",.$(#");
        let results: Vec<_> = scanner.collect();

        // COMMA, DOT, error for '$', LEFT_PAREN, error for '#', EOF.
        assert_eq!(results.len(), 6);

        let error_count = results.iter().filter(|r| r.is_err()).count();
        assert_eq!(error_count, 2);

        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            assert!(
                err.to_string().contains("Unexpected character"),
                "unexpected message: {}",
                err
            );
        }

        let last = results.last().unwrap().as_ref().unwrap();
        assert_eq!(last.token_type, TokenType::EOF);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let scanner = Scanner::new(b"\"never closed");
        let results: Vec<_> = scanner.collect();

        let err = results[0].as_ref().unwrap_err();
        assert!(err.to_string().contains("Unterminated string."));

        // Totality: EOF still comes out after the error.
        let last = results.last().unwrap().as_ref().unwrap();
        assert_eq!(last.token_type, TokenType::EOF);
    }

    #[test]
    fn every_input_ends_with_eof() {
        for source in ["", "\n\n\n", "var x = 1;", "$$$", "\"open"] {
            let scanner = Scanner::new(source.as_bytes());
            let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

            let last = tokens.last().expect("at least the EOF token");
            assert_eq!(last.token_type, TokenType::EOF);
            assert!(last.line >= 1);
        }
    }

    #[test]
    fn eof_line_tracks_newlines() {
        let scanner = Scanner::new(b"one\ntwo\nthree");
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.last().unwrap().line, 3);
    }

    #[test]
    fn scan_tokens_reports_to_the_sink_and_keeps_going() {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan_tokens(b"var x = @ 1;", &mut diagnostics);

        assert!(diagnostics.had_error());
        assert_eq!(diagnostics.errors().len(), 1);

        // The bad character cost us nothing else.
        let types: Vec<_> = tokens.iter().map(|t| t.token_type.clone()).collect();
        assert_eq!(
            types,
            vec![
                TokenType::VAR,
                TokenType::IDENTIFIER,
                TokenType::EQUAL,
                TokenType::NUMBER(1.0),
                TokenType::SEMICOLON,
                TokenType::EOF,
            ]
        );
    }
}
