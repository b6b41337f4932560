//! Parallel conversion of dump pages in bulk-sized batches.

use crate::{
    page::{Article, Page, Template},
    sink::{self, Sink},
    wikitext::{Configuration, Parser},
};
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder, prelude::*};
use std::time::Instant;

/// The most pages converted and stored in one batch.
pub(crate) const MAX_BULK_SIZE: usize = 1000;

/// The stack size of a worker thread. Parsing recurses for each level of
/// nested markup, so a worker needs room for
/// [`DEFAULT_MAX_DEPTH`](crate::wikitext::DEFAULT_MAX_DEPTH) levels.
pub(crate) const WORKER_STACK_SIZE: usize = 16 * 1024 * 1024;

/// Conversion counts for one run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Stats {
    /// Pages which were converted and stored.
    pub converted: usize,
    /// Pages which failed to convert and were skipped.
    pub failed: usize,
}

/// A page conversion pipeline.
pub(crate) struct Pipeline<'a> {
    /// The parser configuration shared by every worker.
    config: &'a Configuration,
    /// The worker pool.
    pool: ThreadPool,
    /// Whether the labels of category links are kept in article text.
    keep_categories: bool,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline with `processes` workers.
    pub fn new(
        config: &'a Configuration,
        processes: usize,
        keep_categories: bool,
    ) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(processes)
            .stack_size(WORKER_STACK_SIZE)
            .thread_name(|index| format!("wikiplain-worker-{index}"))
            .build()?;
        Ok(Self {
            config,
            pool,
            keep_categories,
        })
    }

    /// Converts template pages and stores them in `sink`.
    pub fn process_templates(
        &self,
        pages: Vec<Page>,
        sink: &mut impl Sink,
    ) -> Result<Stats, sink::Error> {
        self.process(
            pages,
            "template",
            |parser, page| {
                let mut template = Template::from(page);
                parser.parse_template(&mut template).map(|()| template)
            },
            |batch| sink.insert_templates(batch),
        )
    }

    /// Converts article pages and stores them, with their inclusions and
    /// links, in `sink`.
    pub fn process_articles(
        &self,
        pages: Vec<Page>,
        sink: &mut impl Sink,
    ) -> Result<Stats, sink::Error> {
        let keep_categories = self.keep_categories;
        self.process(
            pages,
            "article",
            |parser, page| {
                let mut article = Article::from(page);
                parser
                    .parse_article(&mut article, keep_categories)
                    .map(|()| article)
            },
            |batch| sink.insert_articles(batch),
        )
    }

    /// Converts `pages` in batches of at most [`MAX_BULK_SIZE`] with
    /// `convert` and passes each converted batch to `store`. A page which
    /// fails to convert is logged and skipped.
    fn process<T, C, S>(
        &self,
        pages: Vec<Page>,
        kind: &str,
        convert: C,
        mut store: S,
    ) -> Result<Stats, sink::Error>
    where
        T: Send,
        C: Fn(&Parser<'a>, Page) -> Result<T, crate::wikitext::Error> + Sync,
        S: FnMut(&[T]) -> Result<(), sink::Error>,
    {
        let time = Instant::now();
        let total = pages.len();
        let mut stats = Stats::default();
        let mut pages = pages.into_iter();
        loop {
            let batch = pages.by_ref().take(MAX_BULK_SIZE).collect::<Vec<_>>();
            if batch.is_empty() {
                break;
            }

            let size = batch.len();
            let converted = self.pool.install(|| {
                batch
                    .into_par_iter()
                    .map_init(
                        || Parser::new(self.config),
                        |parser, page| {
                            log::debug!("Processing {kind} {}", page.title);
                            let title = page.title.clone();
                            convert(parser, page)
                                .inspect_err(|err| {
                                    log::error!("Failed to process {kind} {title}: {err}");
                                })
                                .ok()
                        },
                    )
                    .flatten()
                    .collect::<Vec<_>>()
            });

            stats.failed += size - converted.len();
            stats.converted += converted.len();
            store(&converted)?;
            log::info!(
                "Wrote {} of {total} {kind} pages",
                stats.converted + stats.failed
            );
        }

        log::info!(
            "Processed {} {kind} pages ({} failed) in {:.2?}",
            stats.converted,
            stats.failed,
            time.elapsed()
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_SOURCE;

    /// A sink which keeps everything in memory.
    #[derive(Default)]
    struct MemorySink {
        articles: Vec<Vec<Article>>,
        templates: Vec<Vec<Template>>,
        flushed: bool,
    }

    impl Sink for MemorySink {
        fn insert_articles(&mut self, pages: &[Article]) -> Result<(), sink::Error> {
            self.articles.push(pages.to_vec());
            Ok(())
        }

        fn insert_templates(&mut self, pages: &[Template]) -> Result<(), sink::Error> {
            self.templates.push(pages.to_vec());
            Ok(())
        }

        fn flush(&mut self) -> Result<(), sink::Error> {
            self.flushed = true;
            Ok(())
        }
    }

    fn page(id: u64, text: &str) -> Page {
        Page {
            title: format!("Page {id}"),
            id,
            revision: id * 10,
            text: text.into(),
            ..Default::default()
        }
    }

    #[test]
    fn articles() {
        let _ = env_logger::try_init();
        let config = Configuration::new(&CONFIG_SOURCE, None).unwrap();
        let pipeline = Pipeline::new(&config, 2, false).unwrap();
        let mut sink = MemorySink::default();
        let stats = pipeline
            .process_articles(
                vec![page(1, "[[Foo]] {{bar}}"), page(2, "[[Category:Baz]]")],
                &mut sink,
            )
            .unwrap();

        assert_eq!(stats, Stats { converted: 2, failed: 0 });
        assert_eq!(sink.articles.len(), 1);
        let batch = &sink.articles[0];
        assert_eq!(batch[0].page.id, 1);
        assert_eq!(batch[0].page.text, "Foo Template:Bar");
        assert_eq!(batch[0].links.len(), 1);
        assert_eq!(batch[0].inclusions.len(), 1);
        assert_eq!(batch[1].page.text, "");
        assert_eq!(batch[1].categories, ["Baz"]);
        assert!(!sink.flushed);
    }

    #[test]
    fn templates() {
        let _ = env_logger::try_init();
        let config = Configuration::new(&CONFIG_SOURCE, None).unwrap();
        let pipeline = Pipeline::new(&config, 1, false).unwrap();
        let mut sink = MemorySink::default();
        pipeline
            .process_templates(vec![page(3, "{{{1}}}<noinclude>doc</noinclude>")], &mut sink)
            .unwrap();

        let template = &sink.templates[0][0];
        assert_eq!(template.page.text, "{{{1}}}");
        assert_eq!(template.params[0].name, "1");
    }

    #[test]
    fn batches() {
        let config = Configuration::new(&CONFIG_SOURCE, None).unwrap();
        let pipeline = Pipeline::new(&config, 4, false).unwrap();
        let mut sink = MemorySink::default();
        let pages = (0..MAX_BULK_SIZE as u64 + 5)
            .map(|id| page(id, "text"))
            .collect::<Vec<_>>();
        let stats = pipeline.process_articles(pages, &mut sink).unwrap();

        assert_eq!(stats.converted, MAX_BULK_SIZE + 5);
        assert_eq!(
            sink.articles.iter().map(Vec::len).collect::<Vec<_>>(),
            [MAX_BULK_SIZE, 5]
        );
        let ids = sink
            .articles
            .iter()
            .flatten()
            .map(|article| article.page.id)
            .collect::<Vec<_>>();
        assert!(ids.is_sorted());
    }

    #[test]
    fn failed_pages_are_skipped() {
        let _ = env_logger::try_init();
        let config = Configuration::new(&CONFIG_SOURCE, None)
            .unwrap()
            .with_max_depth(1);
        let pipeline = Pipeline::new(&config, 1, false).unwrap();
        let mut sink = MemorySink::default();
        let stats = pipeline
            .process_articles(vec![page(1, "{{a|{{b|{{c}}}}}}"), page(2, "ok")], &mut sink)
            .unwrap();

        assert_eq!(stats, Stats { converted: 1, failed: 1 });
        assert_eq!(sink.articles[0].len(), 1);
        assert_eq!(sink.articles[0][0].page.text, "ok");
    }
}
