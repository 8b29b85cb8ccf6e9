// Completion is the deferred result of a write or commit.
//
// Purpose
// - Let callers issue operations without awaiting them, and observe the outcome later.
//
// Notes
// - Local precondition failures produce an already resolved completion.
// - A dispatcher that stops without replying resolves the completion to a connection error.

use crate::modules::transactions::use_cases::transaction_lifecycle::errors::TransactionError;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

pub(crate) type Reply<T> = oneshot::Sender<Result<T, TransactionError>>;

#[must_use = "a completion does nothing unless awaited or dropped deliberately"]
pub struct Completion<T> {
    inner: Inner<T>,
}

enum Inner<T> {
    Ready(Option<Result<T, TransactionError>>),
    Pending(oneshot::Receiver<Result<T, TransactionError>>),
}

impl<T> Completion<T> {
    pub(crate) fn ready(result: Result<T, TransactionError>) -> Self {
        Self {
            inner: Inner::Ready(Some(result)),
        }
    }

    pub(crate) fn channel() -> (Reply<T>, Self) {
        let (sender, receiver) = oneshot::channel();
        (
            sender,
            Self {
                inner: Inner::Pending(receiver),
            },
        )
    }
}

// Never pin-projects into its fields.
impl<T> Unpin for Completion<T> {}

impl<T> Future for Completion<T> {
    type Output = Result<T, TransactionError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().inner {
            Inner::Ready(result) => Poll::Ready(result.take().unwrap_or_else(|| {
                Err(TransactionError::Connection(
                    "completion polled after it resolved".into(),
                ))
            })),
            Inner::Pending(receiver) => Pin::new(receiver).poll(cx).map(|reply| {
                reply.unwrap_or_else(|_| {
                    Err(TransactionError::Connection(
                        "transaction dispatcher stopped before replying".into(),
                    ))
                })
            }),
        }
    }
}
