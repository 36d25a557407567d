mod checkout;
mod notify;
