use core::time::Duration;

use gloo::timers::callback::Interval;
use pixelwar_core::{Scheduler, Ticket};
use yew::html::Scope;

use crate::app::{Msg, PixelWarView};

/// Feeds gate ticks back into the component. Dropping the [`Interval`] clears it.
pub(crate) struct TimerScheduler {
    link: Scope<PixelWarView>,
}

impl TimerScheduler {
    pub(crate) fn new(link: Scope<PixelWarView>) -> Self {
        Self { link }
    }
}

impl Scheduler for TimerScheduler {
    type Handle = Interval;

    fn start(&mut self, ticket: Ticket, period: Duration) -> Interval {
        let link = self.link.clone();
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        Interval::new(millis, move || link.send_message(Msg::Tick(ticket)))
    }
}
