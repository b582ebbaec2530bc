//! Watch subscriptions returned by accessors

use futures::StreamExt;
use futures_core::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

use settingsbox_types::store_adapter::{ChangeEvent, ChangeStream};

use crate::prelude::*;

type ItemStream<T> = Pin<Box<dyn Stream<Item = SbResult<T>> + Send>>;

/// Values written to one setting after the subscription was taken.
///
/// The underlying store subscription is released by `unsubscribe` or when the
/// stream is dropped. The stream ends when the store collection closes.
///
/// Delivery is bounded by the adapter's broadcast capacity: a subscriber that
/// falls further behind than that skips the writes it missed (a warning is
/// logged with the count) and continues with later ones. Read the setting
/// again after a gap if the latest value matters more than every step.
pub struct WatchStream<T> {
	name: Box<str>,
	inner: Option<ItemStream<T>>,
}

impl<T: Send + 'static> WatchStream<T> {
	pub(crate) fn new<F>(name: &str, events: ChangeStream, transform: F) -> Self
	where
		F: Fn(ChangeEvent) -> SbResult<T> + Send + 'static,
	{
		debug!("Watching setting '{}'", name);
		Self { name: name.into(), inner: Some(Box::pin(events.map(transform))) }
	}

	/// Apply a further transformation to every emitted value.
	pub(crate) fn map_values<U, F>(self, f: F) -> WatchStream<U>
	where
		U: Send + 'static,
		F: Fn(T) -> U + Send + 'static,
	{
		let inner = self.inner.map(|stream| -> ItemStream<U> {
			Box::pin(stream.map(move |item| item.map(&f)))
		});
		WatchStream { name: self.name, inner }
	}
}

impl<T> WatchStream<T> {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn is_active(&self) -> bool {
		self.inner.is_some()
	}

	/// Release the store subscription. The stream yields nothing afterwards.
	pub fn unsubscribe(&mut self) {
		if self.inner.take().is_some() {
			debug!("Stopped watching setting '{}'", self.name);
		}
	}
}

impl<T> Stream for WatchStream<T> {
	type Item = SbResult<T>;

	fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
		let this = self.get_mut();
		match this.inner.as_mut() {
			Some(stream) => stream.as_mut().poll_next(cx),
			None => Poll::Ready(None),
		}
	}
}

impl<T> std::fmt::Debug for WatchStream<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("WatchStream")
			.field("name", &self.name)
			.field("active", &self.inner.is_some())
			.finish()
	}
}

// vim: ts=4
