//! SQS value objects

use nimbus_core::wire_enum;

wire_enum! {
    /// Queue attributes settable at creation
    pub enum QueueAttributeName {
        DelaySeconds => "DelaySeconds",
        MaximumMessageSize => "MaximumMessageSize",
        MessageRetentionPeriod => "MessageRetentionPeriod",
        Policy => "Policy",
        ReceiveMessageWaitTimeSeconds => "ReceiveMessageWaitTimeSeconds",
        VisibilityTimeout => "VisibilityTimeout",
        RedrivePolicy => "RedrivePolicy",
        RedriveAllowPolicy => "RedriveAllowPolicy",
        KmsMasterKeyId => "KmsMasterKeyId",
        KmsDataKeyReusePeriodSeconds => "KmsDataKeyReusePeriodSeconds",
        SqsManagedSseEnabled => "SqsManagedSseEnabled",
        FifoQueue => "FifoQueue",
        ContentBasedDeduplication => "ContentBasedDeduplication",
        DeduplicationScope => "DeduplicationScope",
        FifoThroughputLimit => "FifoThroughputLimit",
    }
}
