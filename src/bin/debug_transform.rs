use anyhow::{Context, Result};
use dotenv::dotenv;
use std::io::Read;

use thai_sentiment_api::config::Config;
use thai_sentiment_api::preprocess::Preprocessor;
use thai_sentiment_api::sentiment::SentimentContext;
use thai_sentiment_api::tokenize::{Dictionary, NewmmSegmenter, PunctuationSet, StopwordSet};

/// Pipeline resources without a model, for when the model fails to load.
fn pipeline_only(config: &Config) -> Result<(Preprocessor, StopwordSet)> {
    let dictionary = match &config.dictionary_path {
        Some(path) => Dictionary::from_file(path)
            .with_context(|| format!("failed to load dictionary {}", path.display()))?,
        None => Dictionary::thai(),
    };
    let stopwords = match &config.stopwords_path {
        Some(path) => StopwordSet::from_file(path)
            .with_context(|| format!("failed to load stopwords {}", path.display()))?,
        None => StopwordSet::thai(),
    };
    let preprocessor = Preprocessor::new(
        Box::new(NewmmSegmenter::new(dictionary)),
        PunctuationSet::with_extra(&config.punctuation_extra),
    );
    Ok((preprocessor, stopwords))
}

fn dump(preprocessor: &Preprocessor, stopwords: &StopwordSet, text: &str) {
    println!("input:           {:?}", text);
    for (stage, output) in preprocessor.trace(text) {
        println!("{:<16} {:?}", format!("{}:", stage), output);
    }
    let tokens = preprocessor.transform(text);
    println!("tokens:          {:?}", tokens);
    let content: Vec<&String> = tokens.iter().filter(|t| !stopwords.contains(t)).collect();
    println!("w/o stopwords:   {:?}", content);
}

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let text = if args.is_empty() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        args.join(" ")
    };

    let config = Config::from_env();
    match SentimentContext::load(&config) {
        Ok(context) => {
            dump(context.preprocessor(), context.stopwords(), &text);
            let result = context.classify(&text);
            println!("sentiment:       {} ({})", result.label, result.score);
        }
        Err(e) => {
            let (preprocessor, stopwords) = pipeline_only(&config)?;
            dump(&preprocessor, &stopwords, &text);
            println!("sentiment:       skipped ({:#})", e);
        }
    }

    Ok(())
}
