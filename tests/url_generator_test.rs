#[cfg(test)]
mod tests {
    use anyhow::Result;
    use campaign_qr_api::url_generator::{
        cartesian_values, create, map_values, parse_url, search, slug, CreateOptions, ParamSpec,
    };

    #[tokio::test]
    async fn test_utm_sweep() -> Result<()> {
        let options = CreateOptions::new(
            "https://shop.example.com/spring?ref=newsletter#offers",
            vec![
                ParamSpec::new("utm_source", ["google", "facebook"]),
                ParamSpec::single("utm_medium", "cpc"),
                ParamSpec::new("utm_campaign", ["Spring Sale", "Last Chance"]),
            ],
        )
        .with_slug("Spring Collection");
        let urls = create(options).await?;

        assert_eq!(
            urls,
            vec![
                "https://shop.example.com/spring/spring-collection?ref=newsletter&utm_source=google&utm_medium=cpc&utm_campaign=Spring%20Sale#offers",
                "https://shop.example.com/spring/spring-collection?ref=newsletter&utm_source=google&utm_medium=cpc&utm_campaign=Last%20Chance#offers",
                "https://shop.example.com/spring/spring-collection?ref=newsletter&utm_source=facebook&utm_medium=cpc&utm_campaign=Spring%20Sale#offers",
                "https://shop.example.com/spring/spring-collection?ref=newsletter&utm_source=facebook&utm_medium=cpc&utm_campaign=Last%20Chance#offers",
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_search_matches_create_queries() -> Result<()> {
        let params = vec![
            ParamSpec::new("a", ["1", "2"]),
            ParamSpec::new("b", ["x y"]),
        ];
        let queries = search(params.clone()).await?;
        let urls = create(CreateOptions::new("http://example.com", params)).await?;

        assert_eq!(queries, vec!["?a=1&b=x%20y", "?a=2&b=x%20y"]);
        for (query, url) in queries.iter().zip(&urls) {
            assert_eq!(url, &format!("http://example.com{}", query));
        }
        Ok(())
    }

    #[test]
    fn test_stages_compose() {
        let parsed = parse_url("http://www.google.com/home?test=true");
        assert_eq!(parsed.protocol, "http");
        assert_eq!(parsed.host, "www.google.com");
        assert_eq!(parsed.path, "/home");
        assert_eq!(parsed.query, "test=true");
        assert_eq!(parsed.query_key.get("test"), Some("true"));

        let fragments = map_values(&[ParamSpec::new("utm_campaign", ["google"])]);
        let combined: Vec<String> = cartesian_values(&fragments).collect();
        assert_eq!(combined, vec!["&utm_campaign=google"]);

        assert_eq!(slug("Hello World"), "hello-world");
    }

    #[test]
    fn test_json_options() -> Result<()> {
        let options: CreateOptions = serde_json::from_str(
            r#"{
                "url": "http://www.google.com",
                "params": [{"key": "utm_campaign", "value": ["google", "twitter"]}],
                "slug": "Launch"
            }"#,
        )?;

        assert_eq!(options.slug.as_deref(), Some("Launch"));
        assert_eq!(options.params[0].values.len(), 2);
        Ok(())
    }
}
