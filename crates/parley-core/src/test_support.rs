//! Span field capture for tests.

use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;

/// One recorded field: span name, field name, value.
pub type CapturedField = (String, String, String);

/// Collects every span field value recorded while installed.
#[derive(Clone, Default)]
pub struct SpanCapture {
    fields: Arc<Mutex<Vec<CapturedField>>>,
}

impl SpanCapture {
    /// Install as the thread's default subscriber until the guard drops.
    pub fn install() -> (Self, DefaultGuard) {
        let capture = Self::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    /// Value recorded for `field` on the span named `span`, if any.
    pub fn value(&self, span: &str, field: &str) -> Option<String> {
        self.fields
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(s, f, _)| s == span && f == field)
            .map(|(_, _, v)| v.clone())
    }
}

struct FieldVisitor<'a> {
    span: &'a str,
    out: &'a mut Vec<CapturedField>,
}

impl Visit for FieldVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.out
            .push((self.span.to_string(), field.name().to_string(), value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.out
            .push((self.span.to_string(), field.name().to_string(), format!("{value:?}")));
    }
}

impl<S> Layer<S> for SpanCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        let mut fields = self.fields.lock().unwrap();
        attrs.record(&mut FieldVisitor {
            span: attrs.metadata().name(),
            out: &mut fields,
        });
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else { return };
        let mut fields = self.fields.lock().unwrap();
        values.record(&mut FieldVisitor {
            span: span.name(),
            out: &mut fields,
        });
    }
}
