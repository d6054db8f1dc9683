//! These set of tests are supposed to provide an example for combining the
//! `requirements` function with insta to document the environment variables
//! needed by an application.

#[test]
fn snapshot_as_documentation() {
    use foo::bar::AppConfig;
    // simulate module structure.
    #[allow(unused)]
    mod foo {
        pub mod bar {
            use std::time::Duration;

            use envbind::Record;

            use super::baz::KafkaConfig;

            #[derive(Record)]
            pub struct AppConfig {
                #[env(name = "DATABASE_URL", required)]
                pub database_url: String,
                #[env(name = "REQUEST_TIMEOUT")]
                pub request_timeout: Duration,
                #[env(env_prefix = "KAFKA_")]
                pub kafka: KafkaConfig,
            }
        }

        pub mod baz {
            use envbind::Record;

            #[derive(Record)]
            pub struct KafkaConfig {
                #[env(name = "BROKERS", required)]
                pub brokers: Vec<String>,
                #[env(name = "TOPICS")]
                pub topics: Vec<String>,
            }
        }
    }

    insta::assert_snapshot!(envbind::requirements::<AppConfig>())
}
